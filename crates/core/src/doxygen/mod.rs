//! Adapters from Doxygen's XML output (and plain JSON records) to the
//! indexer traits in `doxtree_api`.

pub mod detail;
pub mod index;
pub mod json;

pub use detail::XmlDirectory;
pub use index::IndexXml;
pub use json::JsonRecords;

/// Restores the five predefined XML entities. `&amp;` goes last so that
/// `&amp;lt;` decodes to `&lt;`, not `<`.
pub fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
