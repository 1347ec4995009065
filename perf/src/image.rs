use url::Url;
use url::form_urlencoded;

/// Set `w` and `q` query parameters on an image URL, replacing any already
/// present. Absolute URLs are rewritten through `url`; relative paths get the
/// parameters placed in front of any fragment.
pub fn with_image_params(src: &str, width: Option<u32>, quality: u8) -> String {
    let width = width.map(|w| w.to_string());
    let quality = quality.to_string();

    if let Ok(mut url) = Url::parse(src) {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !is_hint(k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &kept {
                pairs.append_pair(k, v);
            }
            if let Some(w) = &width {
                pairs.append_pair("w", w);
            }
            pairs.append_pair("q", &quality);
        }
        return url.to_string();
    }

    let (base, fragment) = match src.split_once('#') {
        Some((b, f)) => (b, Some(f)),
        None => (src, None),
    };
    let (path, query) = base.split_once('?').unwrap_or((base, ""));
    let mut params = form_urlencoded::Serializer::new(String::new());
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        if !is_hint(&k) {
            params.append_pair(&k, &v);
        }
    }
    if let Some(w) = &width {
        params.append_pair("w", w);
    }
    params.append_pair("q", &quality);
    let mut out = format!("{path}?{}", params.finish());
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

fn is_hint(key: &str) -> bool {
    key == "w" || key == "q"
}
