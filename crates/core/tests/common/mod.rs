#![allow(dead_code)]

use doxtree_api::{CompoundRecord, NodeKind};
use doxtree_core::Config;
use std::collections::HashMap;
use std::path::Path;

pub fn rec(kind: NodeKind, name: &str, refid: &str) -> CompoundRecord {
    CompoundRecord::new(kind, name, refid)
}

/// A config writing into `out`, stripping `strip` from recovered locations.
pub fn config_in(out: &Path, strip: &Path) -> Config {
    Config::builder()
        .index_path(strip.join("xml").join("index.xml"))
        .output_dir(out)
        .root_file_name("library_root.rst")
        .root_file_title("Library API")
        .strip_from_path(strip)
        .build()
        .expect("valid test config")
}

pub fn details(pairs: &[(&str, String)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(refid, text)| (refid.to_string(), text.clone()))
        .collect()
}

/// Builder for a file detail document in Doxygen's XML layout.
#[derive(Default)]
pub struct FileDetail {
    refid: String,
    name: String,
    location: String,
    includes: Vec<String>,
    included_by: Vec<(String, String)>,
    inner: Vec<(String, String)>,
    listing: Vec<String>,
}

impl FileDetail {
    pub fn new(refid: &str, name: &str, location: &str) -> Self {
        Self {
            refid: refid.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            ..Self::default()
        }
    }

    pub fn include(mut self, header: &str) -> Self {
        self.includes.push(header.to_string());
        self
    }

    pub fn included_by(mut self, refid: &str, name: &str) -> Self {
        self.included_by.push((refid.to_string(), name.to_string()));
        self
    }

    /// `tag` is the element suffix, e.g. `class` or `namespace`.
    pub fn inner(mut self, tag: &str, refid: &str) -> Self {
        self.inner.push((tag.to_string(), refid.to_string()));
        self
    }

    /// One raw `<codeline>` worth of highlighted source.
    pub fn line(mut self, xml: &str) -> Self {
        self.listing.push(xml.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n<doxygen>\n");
        out.push_str(&format!(
            "  <compounddef id=\"{}\" kind=\"file\" language=\"C++\">\n    <compoundname>{}</compoundname>\n",
            self.refid, self.name
        ));
        for header in &self.includes {
            out.push_str(&format!("    <includes local=\"no\">{header}</includes>\n"));
        }
        for (refid, name) in &self.included_by {
            out.push_str(&format!(
                "    <includedby refid=\"{refid}\" local=\"yes\">{name}</includedby>\n"
            ));
        }
        for (tag, refid) in &self.inner {
            out.push_str(&format!(
                "    <inner{tag} refid=\"{refid}\" prot=\"public\">x</inner{tag}>\n"
            ));
        }
        out.push_str("    <programlisting>\n");
        for line in &self.listing {
            out.push_str(&format!("<codeline>{line}</codeline>\n"));
        }
        out.push_str("    </programlisting>\n");
        out.push_str(&format!("    <location file=\"{}\"/>\n", self.location));
        out.push_str("  </compounddef>\n</doxygen>\n");
        out
    }
}
