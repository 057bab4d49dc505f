use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{GenericImageView, ImageFormat};
use parks::ParkRecord;

use crate::error::{GuideError, Result};

/// An image read back from disk, re-encoded as PNG for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub source: PathBuf,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Picture {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| GuideError::assembly(path, e))?;
        let img = image::load_from_memory(&bytes).map_err(|e| GuideError::assembly(path, e))?;
        let (width, height) = img.dimensions();

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| GuideError::assembly(path, e))?;

        Ok(Self {
            source: path.to_path_buf(),
            png,
            width,
            height,
        })
    }

    fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullet(String),
    Picture(Picture),
    PageBreak,
}

/// Ordered content of the travel guide, independent of the output format.
#[derive(Debug, Clone, Default)]
pub struct GuideDocument {
    blocks: Vec<Block>,
}

impl GuideDocument {
    pub fn new(title: &str) -> Self {
        Self {
            blocks: vec![Block::Title(title.to_string())],
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn add_map(&mut self, map: Picture) {
        self.blocks.push(Block::Picture(map));
    }

    /// Append one park's section. `pictures[0]` leads the section, the rest
    /// go under the photographs heading.
    pub fn add_park(&mut self, park: &ParkRecord, pictures: Vec<Picture>) {
        let mut pictures = pictures.into_iter();

        self.blocks.push(Block::Title(park.name.clone()));
        if let Some(first) = pictures.next() {
            self.blocks.push(Block::Picture(first));
        }

        self.heading(2, "Highlights");
        for highlight in &park.highlights {
            self.blocks.push(Block::Bullet(highlight.clone()));
        }

        for (header, description) in &park.park_information {
            self.heading(2, header);
            self.blocks.push(Block::Paragraph(description.clone()));
        }

        self.heading(1, &format!("Photographs of {}", park.name));
        self.blocks.extend(pictures.map(Block::Picture));

        self.heading(1, "Further Information");
        self.heading(3, "Address");
        self.blocks.push(Block::Paragraph(park.address.clone()));
        self.heading(3, "Website");
        self.blocks.push(Block::Paragraph(park.url.clone()));

        self.blocks.push(Block::PageBreak);
    }

    fn heading(&mut self, level: u8, text: &str) {
        self.blocks.push(Block::Heading {
            level,
            text: text.to_string(),
        });
    }

    pub fn page_breaks(&self) -> usize {
        self.blocks.iter().filter(|b| matches!(b, Block::PageBreak)).count()
    }

    /// Text skeleton of the document, one line per block.
    pub fn outline(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Title(text) => format!("title: {}", text),
                Block::Heading { level, text } => format!("h{}: {}", level, text),
                Block::Paragraph(text) => format!("p: {}", text),
                Block::Bullet(text) => format!("- {}", text),
                Block::Picture(picture) => format!("[image {}]", picture.file_name()),
                Block::PageBreak => "---".to_string(),
            })
            .collect()
    }
}
