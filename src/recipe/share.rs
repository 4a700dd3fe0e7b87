use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::foundation::error::{DamascusError, DamascusResult};
use crate::recipe::Recipe;

/// Query parameter that carries the share token.
pub const SHARE_PARAM: &str = "r";

/// Encode a recipe as a URL-safe token (compact JSON, base64url without padding).
pub fn encode_share_token(recipe: &Recipe) -> DamascusResult<String> {
    let json = recipe.to_json_string()?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// Invert [`encode_share_token`]. Trailing `=` padding is tolerated.
pub fn decode_share_token(token: &str) -> DamascusResult<Recipe> {
    let token = token.trim().trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| DamascusError::serde(format!("share token is not base64url: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|_| DamascusError::serde("share token does not hold UTF-8 JSON"))?;
    Recipe::from_json_str(&json)
}

/// Append the share token to `base` as the `r` query parameter.
pub fn share_url(base: &str, recipe: &Recipe) -> DamascusResult<String> {
    let token = encode_share_token(recipe)?;
    let (head, fragment) = match base.split_once('#') {
        Some((h, f)) => (h, Some(f)),
        None => (base, None),
    };
    let sep = if !head.contains('?') {
        "?"
    } else if head.ends_with('?') || head.ends_with('&') {
        ""
    } else {
        "&"
    };
    let mut out = format!("{head}{sep}{SHARE_PARAM}={token}");
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    Ok(out)
}

/// Extract and decode the recipe from a share link.
pub fn recipe_from_url(url: &str) -> DamascusResult<Recipe> {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let query = without_fragment
        .split_once('?')
        .map(|(_, q)| q)
        .ok_or_else(|| DamascusError::validation("share link has no query string"))?;
    let token = query
        .split('&')
        .find_map(|pair| pair.strip_prefix(SHARE_PARAM)?.strip_prefix('='))
        .ok_or_else(|| {
            DamascusError::validation(format!("share link has no '{SHARE_PARAM}' parameter"))
        })?;
    decode_share_token(token)
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/share.rs"]
mod tests;
