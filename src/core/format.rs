//! Target output formats

use std::fmt;

/// Output format for a conversion job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFormat {
    #[default]
    Mp3,
    Wav,
    Flac,
    Ogg,
    Aac,
}

impl TargetFormat {
    /// All formats, in the order the format selector shows them
    pub fn all() -> [TargetFormat; 5] {
        [
            TargetFormat::Mp3,
            TargetFormat::Wav,
            TargetFormat::Flac,
            TargetFormat::Ogg,
            TargetFormat::Aac,
        ]
    }

    /// File extension used verbatim for output names
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Mp3 => "mp3",
            TargetFormat::Wav => "wav",
            TargetFormat::Flac => "flac",
            TargetFormat::Ogg => "ogg",
            TargetFormat::Aac => "aac",
        }
    }

    /// Uppercase label for the format selector
    pub fn label(&self) -> &'static str {
        match self {
            TargetFormat::Mp3 => "MP3",
            TargetFormat::Wav => "WAV",
            TargetFormat::Flac => "FLAC",
            TargetFormat::Ogg => "OGG",
            TargetFormat::Aac => "AAC",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mp3() {
        assert_eq!(TargetFormat::default(), TargetFormat::Mp3);
    }

    #[test]
    fn test_extensions_are_lowercase() {
        for format in TargetFormat::all() {
            let ext = format.extension();
            assert_eq!(ext, ext.to_lowercase());
        }
    }

    #[test]
    fn test_all_lists_five_formats() {
        let all = TargetFormat::all();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], TargetFormat::Mp3);
        assert_eq!(all[4], TargetFormat::Aac);
    }

    #[test]
    fn test_display_matches_extension() {
        assert_eq!(TargetFormat::Flac.to_string(), "flac");
        assert_eq!(TargetFormat::Ogg.to_string(), "ogg");
    }
}
