use serde_json::Value;

use crate::services::translation::TranslateError;

/// The translated segments of one response, in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResponse {
    fragments: Vec<String>,
}

impl TranslationResponse {
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Fragments already carry their own whitespace, so nothing is inserted.
    pub fn text(&self) -> String {
        self.fragments.concat()
    }
}

/// Blanks the second comma of every adjacent `,,` pair.
///
/// Walks from the back comparing each byte with its left neighbour, so a run
/// like `,,,` becomes `,  `. Length is preserved and no other byte changes.
pub fn sanitize_commas(raw: &mut [u8]) {
    for i in (1..raw.len()).rev() {
        if raw[i - 1] == b',' && raw[i] == b',' {
            raw[i] = b' ';
        }
    }
}

/// Blanks commas that directly precede a closing bracket, outside strings.
///
/// Comma sanitizing turns `1,,]` into `1, ]`, which a strict JSON parser
/// still rejects.
fn blank_trailing_commas(raw: &mut [u8]) {
    let mut in_string = false;
    let mut escaped = false;

    for i in 0..raw.len() {
        let byte = raw[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b',' => {
                let next = raw[i + 1..]
                    .iter()
                    .copied()
                    .find(|b| !b.is_ascii_whitespace());
                if matches!(next, Some(b']') | Some(b'}')) {
                    raw[i] = b' ';
                }
            }
            _ => {}
        }
    }
}

/// Parses a raw response body into its translated fragments.
///
/// The root is an array whose element 0 lists sentence pairs; element 0 of
/// each pair is the translated text. Pairs with a `null` translation are
/// transliteration rows and are skipped.
pub fn extract(raw: &[u8]) -> Result<TranslationResponse, TranslateError> {
    let mut body = raw.to_vec();
    sanitize_commas(&mut body);
    blank_trailing_commas(&mut body);

    let root: Value = serde_json::from_slice(&body)?;

    let sentences = root
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("expected an array of sentences at [0]"))?;

    let mut fragments = Vec::with_capacity(sentences.len());
    for (index, pair) in sentences.iter().enumerate() {
        let pair = pair
            .as_array()
            .ok_or_else(|| malformed(&format!("sentence {} is not an array", index)))?;

        match pair.first() {
            Some(Value::String(fragment)) => fragments.push(fragment.clone()),
            Some(Value::Null) => continue,
            _ => {
                return Err(malformed(&format!(
                    "sentence {} has no translated text",
                    index
                )));
            }
        }
    }

    Ok(TranslationResponse::new(fragments))
}

fn malformed(msg: &str) -> TranslateError {
    TranslateError::MalformedResponse(msg.to_string())
}
