//! Tag abbreviation by minimum unique prefix

use std::collections::BTreeMap;

/// Shortest abbreviation the report will print
pub const MIN_PREFIX_LEN: usize = 3;

/// Map every distinct tag name to its shortest unique prefix.
///
/// Prefix lengths are tried from [`MIN_PREFIX_LEN`] up to the full name; the
/// first prefix that no other name starts with wins. Names shorter than the
/// minimum, and names with no unique prefix (such as `work` next to
/// `working`), map to themselves. Lengths count characters, not bytes.
pub fn compute_minimum_unique_prefixes<I, S>(names: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort_unstable();
    names.dedup();

    names
        .iter()
        .map(|name| (name.clone(), unique_prefix(name, &names).to_string()))
        .collect()
}

fn unique_prefix<'a>(name: &'a str, all: &[String]) -> &'a str {
    let boundaries = name
        .char_indices()
        .map(|(i, _)| i)
        .skip(MIN_PREFIX_LEN)
        .chain(std::iter::once(name.len()));

    for end in boundaries {
        let prefix = &name[..end];
        let taken = all
            .iter()
            .any(|other| other != name && other.starts_with(prefix));
        if !taken {
            return prefix;
        }
    }

    name
}
