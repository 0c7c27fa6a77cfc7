//! Per-layer transcription fusion.

use lm_types::{DocumentContext, Line, LineTranscription};

/// Join the content of `ordered` lines under each document layer.
///
/// Layers are visited in document order. Lines with no content under a
/// layer (absent or empty) contribute nothing, so the separator never
/// doubles up. Layers where no line contributes are left out.
pub fn fuse_transcriptions<'a, I>(ordered: I, context: &DocumentContext) -> Vec<LineTranscription>
where
    I: IntoIterator<Item = &'a Line>,
    I::IntoIter: Clone,
{
    let lines = ordered.into_iter();
    let mut buf = [0u8; 4];
    let separator: &str = context.blank_separator.encode_utf8(&mut buf);

    context
        .transcription_layers
        .iter()
        .filter_map(|layer| {
            let fragments: Vec<&str> = lines
                .clone()
                .filter_map(|line| line.content(layer.id))
                .filter(|content| !content.is_empty())
                .collect();
            if fragments.is_empty() {
                None
            } else {
                Some(LineTranscription::new(layer.id, fragments.join(separator)))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lm_types::{Baseline, LayerId, LineId, PartId, TranscriptionLayer};

    fn line(id: u64) -> Line {
        Line::new(
            LineId(id),
            PartId(1),
            Baseline::from_coords(&[(0.0, 0.0), (1.0, 0.0)]),
        )
    }

    fn context(separator: char) -> DocumentContext {
        DocumentContext::new(
            vec![
                TranscriptionLayer::new(LayerId(1), "manual"),
                TranscriptionLayer::new(LayerId(2), "kraken"),
            ],
            separator,
        )
    }

    #[test]
    fn joins_with_separator() {
        let lines = [
            line(1).with_transcription(LayerId(1), "Hello"),
            line(2).with_transcription(LayerId(1), "World"),
        ];
        let fused = fuse_transcriptions(&lines, &context(' '));
        assert_eq!(fused, vec![LineTranscription::new(LayerId(1), "Hello World")]);
    }

    #[test]
    fn missing_content_adds_no_separator() {
        let lines = [
            line(1).with_transcription(LayerId(1), "Hello"),
            line(2),
            line(3).with_transcription(LayerId(1), ""),
            line(4).with_transcription(LayerId(1), "World"),
        ];
        let fused = fuse_transcriptions(&lines, &context(' '));
        assert_eq!(fused[0].content, "Hello World");
    }

    #[test]
    fn layers_without_content_are_omitted() {
        let lines = [
            line(1).with_transcription(LayerId(2), "a"),
            line(2).with_transcription(LayerId(2), "b"),
        ];
        let fused = fuse_transcriptions(&lines, &context(' '));
        assert_eq!(fused, vec![LineTranscription::new(LayerId(2), "a b")]);
    }

    #[test]
    fn follows_document_layer_order() {
        let lines = [
            line(1)
                .with_transcription(LayerId(2), "x")
                .with_transcription(LayerId(1), "y"),
            line(2).with_transcription(LayerId(1), "z"),
        ];
        let fused = fuse_transcriptions(&lines, &context(' '));
        let layers: Vec<LayerId> = fused.iter().map(|t| t.layer).collect();
        assert_eq!(layers, vec![LayerId(1), LayerId(2)]);
        assert_eq!(fused[0].content, "y z");
        assert_eq!(fused[1].content, "x");
    }

    #[test]
    fn custom_and_multibyte_separator() {
        let lines = [
            line(1).with_transcription(LayerId(1), "ab"),
            line(2).with_transcription(LayerId(1), "cd"),
        ];
        assert_eq!(fuse_transcriptions(&lines, &context('_'))[0].content, "ab_cd");
        assert_eq!(fuse_transcriptions(&lines, &context('\u{3000}'))[0].content, "ab\u{3000}cd");
    }

    #[test]
    fn unknown_layers_on_lines_are_ignored() {
        let lines = [
            line(1).with_transcription(LayerId(99), "stray"),
            line(2).with_transcription(LayerId(99), "text"),
        ];
        assert!(fuse_transcriptions(&lines, &context(' ')).is_empty());
    }
}
