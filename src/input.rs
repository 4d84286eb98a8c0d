//! Reading lead emails from files or stdin.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_MAX_INPUT_BYTES;
use crate::error::{LeadParserError, Result};
use crate::mime::extract_message_text;

/// Where a lead email comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Label used in logs, errors and `detect` output.
    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    fn is_eml(&self) -> bool {
        match self {
            InputSource::Stdin => false,
            InputSource::File(path) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("eml")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    pub max_input_bytes: usize,
    /// Decode every input as a MIME message, not just `.eml` files.
    pub force_mime: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            force_mime: false,
        }
    }
}

/// Load one input and return `(label, text)` ready for the parser.
pub fn load_input(source: &InputSource, options: &InputOptions) -> Result<(String, String)> {
    let label = source.label();
    let bytes = match source {
        InputSource::Stdin => {
            read_limited(std::io::stdin().lock(), Path::new("<stdin>"), &label, options)?
        }
        InputSource::File(path) => {
            let file = fs::File::open(path).map_err(|e| LeadParserError::io(path, e))?;
            read_limited(file, path, &label, options)?
        }
    };

    let text = if options.force_mime || source.is_eml() {
        log::debug!("decoding {} as a MIME message", label);
        extract_message_text(&bytes)?
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };

    Ok((label, text))
}

/// Load several inputs, stopping at the first failure.
pub fn load_inputs(sources: &[InputSource], options: &InputOptions) -> Result<Vec<(String, String)>> {
    sources
        .iter()
        .map(|source| load_input(source, options))
        .collect()
}

fn read_limited<R: Read>(
    reader: R,
    path: &Path,
    label: &str,
    options: &InputOptions,
) -> Result<Vec<u8>> {
    let limit = options.max_input_bytes;
    let mut bytes = Vec::new();
    // One byte past the limit is enough to know the input is too large.
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| LeadParserError::io(path, e))?;

    if bytes.len() > limit {
        log::warn!("rejecting {}: larger than {} bytes", label, limit);
        return Err(LeadParserError::InputTooLarge {
            label: label.to_string(),
            size: bytes.len(),
            limit,
        });
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn plain_file_is_read_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Nom : Jean Dupont\nlefigaro.fr\n").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        let (label, text) = load_input(&source, &InputOptions::default()).unwrap();
        assert_eq!(label, file.path().display().to_string());
        assert_eq!(text, "Nom : Jean Dupont\nlefigaro.fr\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Nom : Ren\xe9\n").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        let (_, text) = load_input(&source, &InputOptions::default()).unwrap();
        assert!(text.starts_with("Nom : Ren"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn oversize_input_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'a'; 64]).unwrap();

        let options = InputOptions {
            max_input_bytes: 16,
            force_mime: false,
        };
        let source = InputSource::File(file.path().to_path_buf());
        match load_input(&source, &options) {
            Err(LeadParserError::InputTooLarge { size, limit, .. }) => {
                assert_eq!(limit, 16);
                assert!(size > limit);
            }
            other => panic!("expected InputTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn input_at_the_limit_is_accepted() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'a'; 16]).unwrap();

        let options = InputOptions {
            max_input_bytes: 16,
            force_mime: false,
        };
        let source = InputSource::File(file.path().to_path_buf());
        assert!(load_input(&source, &options).is_ok());
    }

    #[test]
    fn eml_extension_goes_through_mime() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lead.EML");
        fs::write(
            &path,
            "From: noreply@properstar.com\r\nSubject: New lead\r\nContent-Type: text/plain\r\n\r\nName: Tom\r\n",
        )
        .unwrap();

        let (_, text) = load_input(&InputSource::File(path), &InputOptions::default()).unwrap();
        assert_eq!(text, "From: noreply@properstar.com\nSubject: New lead\n\nName: Tom");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_input(&InputSource::File(path.clone()), &InputOptions::default()).unwrap_err();
        match err {
            LeadParserError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn load_inputs_keeps_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("1.txt");
        let second = dir.path().join("2.txt");
        fs::write(&first, "one").unwrap();
        fs::write(&second, "two").unwrap();

        let loaded = load_inputs(
            &[InputSource::File(first), InputSource::File(second)],
            &InputOptions::default(),
        )
        .unwrap();
        let texts: Vec<&str> = loaded.iter().map(|(_, text)| text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
