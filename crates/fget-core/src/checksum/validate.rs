//! Streaming digest validation interposed on the download path.

use std::io::{self, Write};

use super::source::resolve_raw_content;
use super::{resolve_expected_digest, ChecksumError, ChecksumSpec};
use crate::download::TransferOptions;
use crate::hasher::{DigestEngine, HashAlgorithm};

/// Accumulates the digest of every byte written during one download and
/// compares it against the resolved expected digest.
///
/// One instance serves exactly one download. `validate` must only be called
/// after the copy loop has seen end-of-stream; the validator does not know
/// where the stream ends. The first `validate` call finalizes the engine and
/// caches the outcome, so a second call returns the same answer.
#[derive(Debug)]
pub struct StreamingValidator {
    engine: Option<DigestEngine>,
    expected: String,
    filename: String,
    outcome: Option<(bool, String)>,
}

impl StreamingValidator {
    /// Builds a validator by resolving the checksum argument eagerly:
    /// classify, fetch the source if remote or local, and look up the digest
    /// for `target_filename`. Any resolution failure surfaces here, before
    /// the payload transfer starts.
    pub fn for_download(
        algorithm: HashAlgorithm,
        checksum_arg: &str,
        target_filename: &str,
        options: &TransferOptions,
    ) -> Result<Self, ChecksumError> {
        let spec = ChecksumSpec::classify(checksum_arg)?;
        let raw = resolve_raw_content(&spec, options)?;
        let expected = resolve_expected_digest(&raw, target_filename)?;
        tracing::debug!(
            filename = target_filename,
            expected = expected.as_str(),
            "resolved expected digest"
        );
        Ok(Self::new(DigestEngine::new(algorithm), expected, target_filename))
    }

    fn new(engine: DigestEngine, expected: String, filename: &str) -> Self {
        Self {
            engine: Some(engine),
            expected: expected.to_ascii_lowercase(),
            filename: filename.to_string(),
            outcome: None,
        }
    }

    /// Feeds bytes to the digest engine. Infallible; after `validate` has
    /// been called further bytes are ignored.
    pub fn update(&mut self, bytes: &[u8]) {
        if let Some(engine) = self.engine.as_mut() {
            engine.update(bytes);
        }
    }

    /// Finalizes the digest and compares it with the expected one. Returns
    /// false on mismatch, never an error. Idempotent: repeated calls return
    /// the first outcome.
    pub fn validate(&mut self) -> bool {
        if let Some((matched, _)) = &self.outcome {
            return *matched;
        }
        let computed = match self.engine.take() {
            Some(engine) => engine.finalize_hex(),
            None => String::new(),
        };
        let matched = computed == self.expected;
        self.outcome = Some((matched, computed));
        matched
    }

    pub fn expected_digest(&self) -> &str {
        &self.expected
    }

    /// The digest computed over the stream; None before `validate`.
    pub fn computed_digest(&self) -> Option<&str> {
        self.outcome.as_ref().map(|(_, computed)| computed.as_str())
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Write adapter that feeds the validator with exactly the bytes the inner
/// writer accepted, then reports the inner result unchanged.
pub struct ValidatingWriter<'a, W: Write> {
    inner: W,
    validator: &'a mut StreamingValidator,
}

impl<'a, W: Write> ValidatingWriter<'a, W> {
    pub fn new(inner: W, validator: &'a mut StreamingValidator) -> Self {
        Self { inner, validator }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ValidatingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.validator.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";
    const FOX_MD5: &str = "9e107d9d372bb6826bd81d3542a419d6";
    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn literal_validator(algorithm: HashAlgorithm, expected: &str) -> StreamingValidator {
        StreamingValidator::new(
            DigestEngine::new(algorithm),
            expected.to_string(),
            "data.bin",
        )
    }

    #[test]
    fn matching_stream_validates() {
        let mut v = literal_validator(HashAlgorithm::Md5, FOX_MD5);
        v.update(&FOX[..9]);
        v.update(&FOX[9..]);
        assert!(v.validate());
        assert_eq!(v.computed_digest(), Some(FOX_MD5));
    }

    #[test]
    fn wrong_digest_fails_without_error() {
        let mut v = literal_validator(HashAlgorithm::Md5, "9e107d9d");
        v.update(FOX);
        assert!(!v.validate());
    }

    #[test]
    fn validate_is_idempotent() {
        let mut ok = literal_validator(HashAlgorithm::Md5, FOX_MD5);
        ok.update(FOX);
        assert!(ok.validate());
        assert!(ok.validate());

        let mut bad = literal_validator(HashAlgorithm::Md5, "ffff");
        bad.update(FOX);
        assert!(!bad.validate());
        assert!(!bad.validate());
    }

    #[test]
    fn uppercase_expected_digest_matches() {
        let mut v = literal_validator(HashAlgorithm::Md5, &FOX_MD5.to_ascii_uppercase());
        v.update(FOX);
        assert!(v.validate());
    }

    #[test]
    fn empty_stream_hashes_to_empty_input_digest() {
        let mut v = literal_validator(HashAlgorithm::Sha256, EMPTY_SHA256);
        assert!(v.validate());
    }

    #[test]
    fn validating_writer_forwards_and_hashes() {
        let mut v = literal_validator(HashAlgorithm::Md5, FOX_MD5);
        let mut dest: Vec<u8> = Vec::new();
        {
            let mut w = ValidatingWriter::new(&mut dest, &mut v);
            w.write_all(&FOX[..20]).unwrap();
            w.write_all(&FOX[20..]).unwrap();
            w.flush().unwrap();
        }
        assert_eq!(dest, FOX);
        assert!(v.validate());
    }

    #[test]
    fn for_download_rejects_garbage_argument() {
        let err = StreamingValidator::for_download(
            HashAlgorithm::Sha256,
            "totally invalid",
            "",
            &TransferOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid checksum"));
    }

    #[test]
    fn for_download_literal_resolves_case_insensitively() {
        let v = StreamingValidator::for_download(
            HashAlgorithm::Md5,
            &FOX_MD5.to_ascii_uppercase(),
            "data.bin",
            &TransferOptions::default(),
        )
        .unwrap();
        assert_eq!(v.expected_digest(), FOX_MD5);
    }
}
