//! Drawing tool blocks.
//!
//! Pen, brush, font and symbol definitions shared by the features of a
//! `.MAP` file. They are stored as tagged records in a chain of tool pages
//! starting at the header's first tool block pointer, and are referenced by
//! 1-based index from object records (0 means "none").

use super::constants::{tool_block, MAP_BLOCK_SIZE};
use super::raw_block::{file_offset, BlockType, ChainedBlock};
use crate::error::{MitabError, Result};
use crate::entities::{BrushDef, FontDef, PenDef, SymbolDef};
use crate::types::RgbColor;

use std::io::{Read, Seek};

/// All tool definitions of a file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ToolTable {
    pens: Vec<PenDef>,
    brushes: Vec<BrushDef>,
    fonts: Vec<FontDef>,
    symbols: Vec<SymbolDef>,
}

/// 1-based lookup; 0 and out-of-range indexes yield `None`.
fn lookup<T>(items: &[T], index: i32) -> Option<&T> {
    let i = usize::try_from(index).ok()?.checked_sub(1)?;
    items.get(i)
}

impl ToolTable {
    /// Read every tool record in the chain starting at `first_block`.
    ///
    /// A non-positive pointer means the file has no tool blocks. Any
    /// unrecognized record tag fails the whole load.
    pub fn read<R: Read + Seek>(source: &mut R, first_block: i32) -> Result<Self> {
        let mut table = ToolTable::default();
        if first_block <= 0 {
            return Ok(table);
        }

        let mut block = ChainedBlock::new(BlockType::Tool, MAP_BLOCK_SIZE);
        block.goto_block_data(source, file_offset(first_block)?)?;

        while !block.at_end_of_chain() {
            let tag = block.read_u8(source)?;
            match tag {
                tool_block::TAG_PEN => table.pens.push(PenDef {
                    ref_count: block.read_i32(source)?,
                    line_width: block.read_u8(source)?,
                    line_pattern: block.read_u8(source)?,
                    line_style: block.read_u8(source)?,
                    color: read_rgb(&mut block, source)?,
                }),
                tool_block::TAG_BRUSH => table.brushes.push(BrushDef {
                    ref_count: block.read_i32(source)?,
                    fill_pattern: block.read_u8(source)?,
                    transparent_fill: block.read_u8(source)? != 0,
                    fg_color: read_rgb(&mut block, source)?,
                    bg_color: read_rgb(&mut block, source)?,
                }),
                tool_block::TAG_FONT => {
                    let ref_count = block.read_i32(source)?;
                    let mut name = [0u8; tool_block::FONT_NAME_LEN];
                    block.read_bytes(source, &mut name)?;
                    table.fonts.push(FontDef {
                        ref_count,
                        name: decode_c_string(&name),
                    });
                }
                tool_block::TAG_SYMBOL => table.symbols.push(SymbolDef {
                    ref_count: block.read_i32(source)?,
                    symbol_no: block.read_i16(source)?,
                    point_size: block.read_i16(source)?,
                    unknown: block.read_u8(source)?,
                    color: read_rgb(&mut block, source)?,
                }),
                other => {
                    return Err(MitabError::UnsupportedFormat(format!(
                        "unsupported drawing tool type {other} at offset {}",
                        block.file_position() - 1
                    )));
                }
            }
        }

        tracing::debug!(
            pens = table.pens.len(),
            brushes = table.brushes.len(),
            fonts = table.fonts.len(),
            symbols = table.symbols.len(),
            "loaded drawing tools"
        );
        Ok(table)
    }

    pub fn pen(&self, index: i32) -> Option<&PenDef> {
        lookup(&self.pens, index)
    }

    pub fn brush(&self, index: i32) -> Option<&BrushDef> {
        lookup(&self.brushes, index)
    }

    pub fn font(&self, index: i32) -> Option<&FontDef> {
        lookup(&self.fonts, index)
    }

    pub fn symbol(&self, index: i32) -> Option<&SymbolDef> {
        lookup(&self.symbols, index)
    }

    pub fn num_pens(&self) -> usize {
        self.pens.len()
    }

    pub fn num_brushes(&self) -> usize {
        self.brushes.len()
    }

    pub fn num_fonts(&self) -> usize {
        self.fonts.len()
    }

    pub fn num_symbols(&self) -> usize {
        self.symbols.len()
    }
}

/// Three bytes assembled most significant first.
fn read_rgb<R: Read + Seek>(block: &mut ChainedBlock, source: &mut R) -> Result<RgbColor> {
    let r = block.read_u8(source)?;
    let g = block.read_u8(source)?;
    let b = block.read_u8(source)?;
    Ok(RgbColor::from_bytes(r, g, b))
}

/// Decode a NUL-padded Windows-1252 string.
pub(crate) fn decode_c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes[..end]);
    text.into_owned()
}
