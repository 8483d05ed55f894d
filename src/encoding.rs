use percent_encoding::{utf8_percent_encode, AsciiSet};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
//
// The remote verifier (Zend's OAuth utility) keeps '~' literal as well,
// so a '%7E' anywhere in the signed string breaks the signature.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `value` with the RFC 3986 unreserved set.
///
/// Used for every piece of the signature base string, the signing key, the
/// `Authorization` header fields and the signed query string.
pub fn percent_encode_strict(value: &str) -> String {
    utf8_percent_encode(value, TARGETS_FOR_PARAMS).to_string()
}
