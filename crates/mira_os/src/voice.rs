#![forbid(unsafe_code)]

use tracing::debug;

use mira_engines::normalize::{NormalizerConfig, NormalizerRuntime};
use mira_engines::parse::{IntentParserConfig, IntentParserRuntime};
use mira_kernel_contracts::capture::CaptureLocale;
use mira_kernel_contracts::intent::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceConfig {
    pub max_transcript_chars: usize,
    pub max_intents: u8,
}

impl VoiceConfig {
    pub fn mvp_v1() -> Self {
        Self {
            max_transcript_chars: 2048,
            max_intents: 10,
        }
    }
}

/// Front half of the pipeline: locale gate, normalization, parsing.
///
/// A pure function of its inputs plus the static dictionaries; applying the
/// extracted intents is the router's job.
pub struct VoiceTurnWiring {
    config: VoiceConfig,
    normalizer: NormalizerRuntime,
    parser: IntentParserRuntime,
}

impl VoiceTurnWiring {
    pub fn new(config: VoiceConfig) -> Self {
        Self {
            config,
            normalizer: NormalizerRuntime::new(NormalizerConfig {
                max_transcript_chars: config.max_transcript_chars,
            }),
            parser: IntentParserRuntime::new(IntentParserConfig {
                max_intents: config.max_intents,
            }),
        }
    }

    pub fn interpret(&self, transcript: &str, locale: &CaptureLocale) -> Vec<Intent> {
        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        if trimmed.chars().count() > self.config.max_transcript_chars {
            debug!(chars = trimmed.chars().count(), "transcript over budget, dropped");
            return Vec::new();
        }

        // Only Arabic locales carry source-language phrases; anything else
        // is assumed to already be English.
        let canonical = if locale.is_arabic() {
            self.normalizer.normalize(trimmed).text
        } else {
            trimmed.to_string()
        };

        let intents = self.parser.parse(&canonical);
        if intents.is_empty() {
            debug!(%canonical, "no rule matched, command ignored");
        }
        intents
    }
}

impl Default for VoiceTurnWiring {
    fn default() -> Self {
        Self::new(VoiceConfig::mvp_v1())
    }
}
