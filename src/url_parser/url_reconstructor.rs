use url::Url;

/// Replaces the URL's query with the given pairs, removing `?` when there are none
pub fn reconstruct_query(url: &mut Url, query_pairs: &[(String, String)]) {
    url.set_query(None);

    if !query_pairs.is_empty() {
        let mut serializer = url.query_pairs_mut();
        for (key, value) in query_pairs {
            serializer.append_pair(key, value);
        }
        // Release the borrow on url
        drop(serializer);
    }
}

/// Serializes the URL, then applies the slash rules that only make sense on the final string
///
/// `had_trailing_slash` is whether the input string (before parsing) ended in `/`.
pub fn reconstruct_url(
    url: &Url,
    had_trailing_slash: bool,
    remove_trailing_slash: bool,
    remove_single_slash: bool,
) -> String {
    let mut serialized = url.to_string();
    let is_root = url.path() == "/";
    let has_fragment = url.fragment().is_some();

    if !remove_single_slash && is_root && !had_trailing_slash && !has_fragment {
        strip_one_trailing_slash(&mut serialized);
    }

    if (remove_trailing_slash || is_root) && !has_fragment && remove_single_slash {
        strip_one_trailing_slash(&mut serialized);
    }

    serialized
}

fn strip_one_trailing_slash(serialized: &mut String) {
    if serialized.ends_with('/') {
        serialized.pop();
    }
}
