//! Tracks step - converts subtitles and writes per-track tag XML.
//!
//! Streams are handled in probe order. Subtitles are extracted to their own
//! SRT file and become track 0 of that file; every other stream is taken
//! from the source under its own index.
//!
//! The first image stream ends the loop. Cover art is expected to be the
//! last stream, so anything after it is dropped as well.

use crate::mux::tag_path;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};
use crate::subtitles::{convert_subtitle, subtitle_path};
use crate::tags::write_tags_file;

pub struct TracksStep;

impl PipelineStep for TracksStep {
    fn name(&self) -> &str {
        "Tracks"
    }

    fn description(&self) -> &str {
        "Convert subtitles and write track tags"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let probe = state
            .probe
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("source has not been probed"))?;

        for (position, stream) in probe.streams.iter().enumerate() {
            if stream.is_cover_art() {
                tracing::info!(
                    "Stream {} is cover art ({}), ignoring it and {} later stream(s)",
                    stream.index,
                    stream.codec_name,
                    probe.streams.len() - position - 1
                );
                break;
            }

            let (file, track_id) = if stream.is_subtitle() {
                let dest = subtitle_path(&ctx.input, stream.index);
                convert_subtitle(&ctx.tools.ffmpeg, &ctx.input, stream.index, &dest)?;
                state.subtitle_files.push(dest.clone());
                (dest, 0)
            } else {
                (ctx.input.clone(), stream.index)
            };

            let mut tags = stream.tags.clone();
            tags.apply_overrides(&ctx.track_overrides);

            let xml = tag_path(&file, track_id);
            write_tags_file(&tags, &xml)?;

            let language = tags.get("language");
            tracing::info!(
                "Track {} ({}, {}): {} tag(s){}",
                stream.index,
                stream.codec_type,
                stream.codec_name,
                tags.len(),
                language.map(|l| format!(", language {}", l)).unwrap_or_default()
            );

            state.collection.record(&file, track_id, language);
        }

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let files = state
            .subtitle_files
            .iter()
            .cloned()
            .chain(state.collection.tag_files());

        for file in files {
            if !file.is_file() {
                return Err(StepError::invalid_output(format!(
                    "Expected file missing: {}",
                    file.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProbeResult, StreamInfo, TagOverrides, Tags, TrackType};
    use crate::tags::parse_tags_xml;
    use std::path::Path;

    fn stream(index: u32, codec: &str, codec_type: TrackType, tags: &[(&str, &str)]) -> StreamInfo {
        StreamInfo::new(index, codec, codec_type).with_tags(tags.iter().copied().collect::<Tags>())
    }

    #[test]
    fn stops_at_cover_art() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.m4v");
        let ctx = Context::new(&input, dir.path().join("out.mkv"));

        let mut state = JobState::new();
        state.probe = Some(ProbeResult {
            source: input.clone(),
            format_tags: Tags::new(),
            streams: vec![
                stream(0, "h264", TrackType::Video, &[]),
                stream(1, "aac", TrackType::Audio, &[("language", "eng")]),
                stream(2, "mjpeg", TrackType::Video, &[]),
                stream(3, "aac", TrackType::Audio, &[("language", "jpn")]),
            ],
        });

        TracksStep.execute(&ctx, &mut state).unwrap();
        TracksStep.validate_output(&ctx, &state).unwrap();

        let tracks = state.collection.tracks(&input).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks.get(&0), Some(&None));
        assert_eq!(tracks.get(&1), Some(&Some("eng".to_string())));
        assert!(!dir.path().join("in.m4v.2.xml").exists());
        assert!(!dir.path().join("in.m4v.3.xml").exists());
    }

    #[test]
    fn applies_track_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.m4v");
        let overrides: TagOverrides = r#"{"creation_time": null, "language": "ger"}"#.parse().unwrap();
        let ctx = Context::new(&input, dir.path().join("out.mkv")).with_track_overrides(overrides);

        let mut state = JobState::new();
        state.probe = Some(ProbeResult {
            source: input.clone(),
            format_tags: Tags::new(),
            streams: vec![stream(
                1,
                "aac",
                TrackType::Audio,
                &[("creation_time", "2019-01-01"), ("language", "eng"), ("handler_name", "Sound")],
            )],
        });

        TracksStep.execute(&ctx, &mut state).unwrap();

        let xml = std::fs::read_to_string(dir.path().join("in.m4v.1.xml")).unwrap();
        let tags = parse_tags_xml(&xml).unwrap();
        let entries: Vec<_> = tags.iter().collect();
        assert_eq!(entries, [("LANGUAGE", "ger"), ("HANDLER_NAME", "Sound")]);
        assert_eq!(
            state.collection.tracks(Path::new(&input)).unwrap().get(&1),
            Some(&Some("ger".to_string()))
        );
    }

    #[test]
    fn missing_tag_file_fails_validation() {
        let ctx = Context::new("in.m4v", "out.mkv");
        let mut state = JobState::new();
        state.collection.record(Path::new("/nonexistent/in.m4v"), 0, None);

        let err = TracksStep.validate_output(&ctx, &state).unwrap_err();
        assert!(matches!(err, StepError::InvalidOutput(_)));
    }
}
