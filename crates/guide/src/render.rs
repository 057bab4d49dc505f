use std::fs::File;
use std::path::Path;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Pic, Run, Start, Style, StyleType,
};
use tracing::info;

use crate::document::{Block, GuideDocument, Picture};
use crate::error::{GuideError, Result};

/// Page content width pictures are scaled to.
const PICTURE_WIDTH_INCHES: f64 = 6.0;
/// Tall pictures are shrunk to fit the page.
const PICTURE_MAX_HEIGHT_INCHES: f64 = 8.5;
const EMU_PER_INCH: f64 = 914_400.0;
const BULLET_NUMBERING_ID: usize = 1;

/// Render the document as DOCX, replacing any file at `path`.
pub fn write_docx(document: &GuideDocument, path: &Path) -> Result<()> {
    let mut docx = base_document();

    for block in document.blocks() {
        docx = docx.add_paragraph(paragraph(block));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GuideError::assembly(path, e))?;
    }
    let file = File::create(path).map_err(|e| GuideError::assembly(path, e))?;
    docx.build()
        .pack(file)
        .map_err(|e| GuideError::assembly(path, e))?;

    info!(path = ?path, blocks = document.blocks().len(), "Wrote document");
    Ok(())
}

fn base_document() -> Docx {
    let bullet = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    );

    Docx::new()
        .add_style(Style::new("Title", StyleType::Paragraph).name("Title").size(56))
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_style(
            Style::new("Heading3", StyleType::Paragraph)
                .name("Heading 3")
                .size(24)
                .bold(),
        )
        .add_style(Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"))
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn text(text: &str) -> Run {
    Run::new().add_text(text)
}

fn paragraph(block: &Block) -> Paragraph {
    match block {
        Block::Title(t) => Paragraph::new().add_run(text(t)).style("Title"),
        Block::Heading { level, text: t } => Paragraph::new()
            .add_run(text(t))
            .style(&format!("Heading{}", level)),
        Block::Paragraph(t) => Paragraph::new().add_run(text(t)),
        Block::Bullet(t) => Paragraph::new()
            .add_run(text(t))
            .style("ListBullet")
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        Block::Picture(picture) => Paragraph::new().add_run(Run::new().add_image(pic(picture))),
        Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
    }
}

/// Scale to the page width, keeping the aspect ratio.
fn pic(picture: &Picture) -> Pic {
    let (width, height) = picture_size_emu(picture.width, picture.height);
    Pic::new_with_dimensions(picture.png.clone(), picture.width, picture.height).size(width, height)
}

fn picture_size_emu(width_px: u32, height_px: u32) -> (u32, u32) {
    let max_width = PICTURE_WIDTH_INCHES * EMU_PER_INCH;
    let max_height = PICTURE_MAX_HEIGHT_INCHES * EMU_PER_INCH;
    let ratio = height_px as f64 / width_px.max(1) as f64;

    let (width, height) = if max_width * ratio > max_height {
        (max_height / ratio, max_height)
    } else {
        (max_width, max_width * ratio)
    };
    (width.round().max(1.0) as u32, height.round().max(1.0) as u32)
}
