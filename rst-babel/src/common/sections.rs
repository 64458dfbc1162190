//! Groups a flat document into nested sections.
//!
//! The builder emits titles as ordinary blocks, in document order. Serializers that need the
//! section hierarchy get it from here: every title opens a section that runs until the next title
//! of the same or a shallower level.
//!
//! ```text
//! Title(1) A          -> A
//! Paragraph              ├─ Paragraph
//! Title(2) B             └─ B
//! Paragraph                 └─ Paragraph
//! Title(1) C          -> C   (closes B, then A)
//! ```

use crate::ir::nodes::{Block, Document, Section};

/// Build the section tree. Blocks before the first title go into a leading untitled section.
pub fn sectionize(document: &Document) -> Vec<Section> {
    let mut roots: Vec<Section> = vec![];
    let mut open: Vec<Section> = vec![];

    for block in &document.blocks {
        match block {
            Block::Title(title) => {
                close_sections_at_or_deeper(&mut open, &mut roots, title.level);
                open.push(Section {
                    title: Some(title.clone()),
                    ..Section::default()
                });
            }
            other => match open.last_mut() {
                Some(section) => section.blocks.push(other.clone()),
                None => match roots.last_mut() {
                    Some(section) if section.title.is_none() => section.blocks.push(other.clone()),
                    _ => roots.push(Section {
                        blocks: vec![other.clone()],
                        ..Section::default()
                    }),
                },
            },
        }
    }

    close_sections_at_or_deeper(&mut open, &mut roots, 0);
    roots
}

/// Pop open sections whose level is `level` or deeper, attaching each to its parent.
fn close_sections_at_or_deeper(open: &mut Vec<Section>, roots: &mut Vec<Section>, level: u8) {
    while open.last().is_some_and(|section| section.level() >= level) {
        let Some(section) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.subsections.push(section),
            None => roots.push(section),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Inline, Paragraph, Title};

    fn title(level: u8, text: &str) -> Block {
        Block::Title(Title {
            level,
            content: vec![Inline::text(text)],
        })
    }

    fn para(text: &str) -> Block {
        Block::Paragraph(Paragraph {
            content: vec![Inline::text(text)],
        })
    }

    #[test]
    fn nests_deeper_titles() {
        let document = Document {
            blocks: vec![
                title(1, "A"),
                para("a"),
                title(2, "B"),
                para("b"),
                title(1, "C"),
            ],
        };
        let sections = sectionize(&document);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].blocks, vec![para("a")]);
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].blocks, vec![para("b")]);
        assert_eq!(sections[1].level(), 1);
    }

    #[test]
    fn leading_blocks_form_untitled_section() {
        let document = Document {
            blocks: vec![para("intro"), para("more"), title(3, "Late")],
        };
        let sections = sectionize(&document);
        assert_eq!(sections.len(), 2);
        assert!(sections[0].title.is_none());
        assert_eq!(sections[0].blocks.len(), 2);
        assert_eq!(sections[1].level(), 3);
    }

    #[test]
    fn skipped_levels_still_nest() {
        let document = Document {
            blocks: vec![title(1, "A"), title(4, "D"), title(2, "B")],
        };
        let sections = sectionize(&document);
        assert_eq!(sections.len(), 1);
        let children: Vec<u8> = sections[0].subsections.iter().map(Section::level).collect();
        assert_eq!(children, vec![4, 2]);
    }
}
