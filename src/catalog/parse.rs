//! Catalog file parsing
//!
//! Reads an OASIS XML catalog and extracts its `public` entries. Both
//! namespaced (`urn:oasis:names:tc:entity:xmlns:xml:catalog`) and
//! namespace-less catalogs are accepted. Entries nested in `group` elements
//! are included in document order.
//!
//! A document type declaration in the prolog is blanked out before parsing.
//! Catalogs routinely reference the OASIS catalog DTD, but the parser does
//! not process DTDs and nothing in a catalog depends on one.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use xot::{NameId, Node, Xot};

use super::{CatalogRecord, IdentifierMapping};
use crate::defaults::OASIS_CATALOG_NS;
use crate::error::{Error, Result};

/// Interned names looked up while walking a catalog document
struct CatalogNames {
    catalog: NameId,
    catalog_ns: NameId,
    public: NameId,
    public_ns: NameId,
    public_id: NameId,
    uri: NameId,
    prefer: NameId,
}

impl CatalogNames {
    fn new(xot: &mut Xot) -> Self {
        let ns = xot.add_namespace(OASIS_CATALOG_NS);
        Self {
            catalog: xot.add_name("catalog"),
            catalog_ns: xot.add_name_ns("catalog", ns),
            public: xot.add_name("public"),
            public_ns: xot.add_name_ns("public", ns),
            public_id: xot.add_name("publicId"),
            uri: xot.add_name("uri"),
            prefer: xot.add_name("prefer"),
        }
    }

    fn is_catalog(&self, name: NameId) -> bool {
        name == self.catalog || name == self.catalog_ns
    }

    fn is_public(&self, name: NameId) -> bool {
        name == self.public || name == self.public_ns
    }
}

/// Parse the catalog file at `path`
pub fn parse_file(path: &Path) -> Result<CatalogRecord> {
    let content = fs::read_to_string(path).map_err(|e| parse_error(path, e.to_string()))?;
    parse_str(&content, path)
}

/// Parse catalog `content` that was read from `path`
///
/// `path` names the record and is the base for resolving relative `uri`
/// attributes.
pub fn parse_str(content: &str, path: &Path) -> Result<CatalogRecord> {
    let mut xot = Xot::new();
    let names = CatalogNames::new(&mut xot);

    let root = xot
        .parse(&without_doctype(content))
        .map_err(|e| parse_error(path, e.to_string()))?;
    let document_element = xot
        .document_element(root)
        .map_err(|e| parse_error(path, e.to_string()))?;

    let is_catalog = xot
        .element(document_element)
        .is_some_and(|element| names.is_catalog(element.name()));
    if !is_catalog {
        return Err(parse_error(path, "document element is not <catalog>"));
    }

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let mut mappings = Vec::new();
    for node in xot.descendants(document_element) {
        let is_public = xot
            .element(node)
            .is_some_and(|element| names.is_public(element.name()));
        if is_public {
            mappings.push(read_public_entry(&xot, &names, node, path, base)?);
        }
    }

    Ok(CatalogRecord {
        path: path.to_path_buf(),
        prefer: xot
            .get_attribute(document_element, names.prefer)
            .map(str::to_string),
        mappings,
    })
}

fn read_public_entry(
    xot: &Xot,
    names: &CatalogNames,
    node: Node,
    path: &Path,
    base: &Path,
) -> Result<IdentifierMapping> {
    let public_id = xot
        .get_attribute(node, names.public_id)
        .ok_or_else(|| parse_error(path, "public entry lacks 'publicId'"))?;
    let uri = xot
        .get_attribute(node, names.uri)
        .ok_or_else(|| parse_error(path, "public entry lacks 'uri'"))?;

    Ok(IdentifierMapping {
        public_id: normalize_public_id(public_id),
        uri: uri.to_string(),
        location: resolve_location(base, uri),
    })
}

/// Normalize a public identifier: strip leading and trailing whitespace and
/// collapse each internal run of whitespace to a single space.
pub fn normalize_public_id(public_id: &str) -> String {
    public_id
        .split(is_xml_blank)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_xml_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Resolve a catalog `uri` against the catalog's directory. URIs with a
/// scheme and absolute paths are returned unchanged.
fn resolve_location(base: &Path, uri: &str) -> String {
    if uri.contains("://") || Path::new(uri).is_absolute() {
        return uri.to_string();
    }
    let resolved: PathBuf = crate::path::normalize(&base.join(uri));
    resolved.display().to_string()
}

/// `content` with its document type declaration replaced by whitespace
///
/// Byte offsets and line numbers are preserved so parser errors still point
/// at the right place.
fn without_doctype(content: &str) -> Cow<'_, str> {
    let Some((start, end)) = doctype_span(content) else {
        return Cow::Borrowed(content);
    };
    let mut blanked = String::with_capacity(content.len());
    blanked.push_str(&content[..start]);
    blanked.extend(
        content.as_bytes()[start..end]
            .iter()
            .map(|&b| if b == b'\n' { '\n' } else { ' ' }),
    );
    blanked.push_str(&content[end..]);
    Cow::Owned(blanked)
}

/// Byte range of the `<!DOCTYPE ...>` declaration, if the prolog has one
fn doctype_span(content: &str) -> Option<(usize, usize)> {
    let mut pos = 0;
    loop {
        let rest = &content[pos..];
        let trimmed = rest.trim_start_matches(['\u{feff}', ' ', '\t', '\r', '\n']);
        pos += rest.len() - trimmed.len();

        if trimmed.starts_with("<?") {
            pos += trimmed.find("?>")? + 2;
        } else if trimmed.starts_with("<!--") {
            pos += trimmed.find("-->")? + 3;
        } else if trimmed.starts_with(DOCTYPE_OPEN) {
            return Some((pos, pos + doctype_len(trimmed)?));
        } else {
            return None;
        }
    }
}

const DOCTYPE_OPEN: &str = "<!DOCTYPE";

/// Length of the declaration at the start of `decl`, skipping over quoted
/// literals and the internal subset
fn doctype_len(decl: &str) -> Option<usize> {
    let mut quote = None;
    let mut depth = 0usize;
    for (i, c) in decl.char_indices().skip(DOCTYPE_OPEN.len()) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Some(i + 1),
                _ => {}
            },
        }
    }
    None
}

fn parse_error(path: &Path, message: impl Into<String>) -> Error {
    Error::CatalogParseFailed {
        path: path.display().to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OASIS_CATALOG: &str = r#"<?xml version="1.0"?>
<catalog xmlns="urn:oasis:names:tc:entity:xmlns:xml:catalog" prefer="public">
  <public publicId="-//OASIS//DTD DITA Topic//EN" uri="dtd/topic.dtd"/>
  <group>
    <public publicId="-//OASIS//DTD DITA   Map//EN" uri="dtd/map.dtd"/>
  </group>
  <system systemId="urn:x" uri="ignored.dtd"/>
</catalog>
"#;

    #[test]
    fn test_parse_oasis_catalog() {
        let record = parse_str(OASIS_CATALOG, Path::new("/schemas/catalog.xml")).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.prefer.as_deref(), Some("public"));
        assert_eq!(record.path, PathBuf::from("/schemas/catalog.xml"));

        assert_eq!(record.mappings[0].public_id, "-//OASIS//DTD DITA Topic//EN");
        assert_eq!(record.mappings[0].uri, "dtd/topic.dtd");
        assert_eq!(record.mappings[0].location, "/schemas/dtd/topic.dtd");
        assert_eq!(record.mappings[1].public_id, "-//OASIS//DTD DITA Map//EN");
    }

    #[test]
    fn test_parse_catalog_with_oasis_doctype() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE catalog PUBLIC "-//OASIS//DTD XML Catalogs V1.1//EN"
  "http://www.oasis-open.org/committees/entity/release/1.1/catalog.dtd">
<catalog xmlns="urn:oasis:names:tc:entity:xmlns:xml:catalog">
  <public publicId="-//X//EN" uri="x.dtd"/>
</catalog>
"#;
        let record = parse_str(content, Path::new("/s/catalog.xml")).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.mappings[0].public_id, "-//X//EN");
        assert_eq!(record.mappings[0].location, "/s/x.dtd");
    }

    #[test]
    fn test_parse_catalog_with_internal_subset() {
        let content = r#"<!-- header -->
<!DOCTYPE catalog [
  <!ENTITY % local "IGNORE">
  <!ATTLIST catalog note CDATA "a > b ]">
]>
<catalog><public publicId="-//Y//EN" uri="y.dtd"/></catalog>"#;
        let record = parse_str(content, Path::new("/s/catalog.xml")).unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_doctype_span() {
        let content = "<?xml version=\"1.0\"?>\n<!DOCTYPE catalog>\n<catalog/>";
        let (start, end) = doctype_span(content).unwrap();
        assert_eq!(&content[start..end], "<!DOCTYPE catalog>");

        assert_eq!(doctype_span("<catalog/>"), None);
        assert_eq!(doctype_span("<catalog><!DOCTYPE x></catalog>"), None);
        assert_eq!(doctype_span("<!DOCTYPE catalog"), None);
    }

    #[test]
    fn test_without_doctype_preserves_offsets() {
        let content = "<!DOCTYPE catalog\n  SYSTEM \"c.dtd\">\n<catalog/>";
        let blanked = without_doctype(content);
        assert_eq!(blanked.len(), content.len());
        assert_eq!(blanked.lines().count(), content.lines().count());
        assert!(blanked.trim_start().starts_with("<catalog/>"));
        assert!(matches!(without_doctype("<catalog/>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_parse_catalog_without_namespace() {
        let content = r#"<catalog><public publicId="-//X//EN" uri="x.dtd"/></catalog>"#;
        let record = parse_str(content, Path::new("/s/catalog.xml")).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.prefer, None);
    }

    #[test]
    fn test_parse_empty_catalog_is_not_an_error() {
        let content = r#"<catalog xmlns="urn:oasis:names:tc:entity:xmlns:xml:catalog"/>"#;
        let record = parse_str(content, Path::new("/s/catalog.xml")).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_parse_malformed_xml() {
        let err = parse_str("<catalog><public", Path::new("/s/catalog.xml")).unwrap_err();
        match err {
            Error::CatalogParseFailed { path, .. } => assert_eq!(path, "/s/catalog.xml"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_wrong_document_element() {
        let err = parse_str("<book/>", Path::new("/s/catalog.xml")).unwrap_err();
        assert!(err.to_string().contains("not <catalog>"));
    }

    #[test]
    fn test_parse_public_without_uri() {
        let content = r#"<catalog><public publicId="-//X//EN"/></catalog>"#;
        let err = parse_str(content, Path::new("/s/catalog.xml")).unwrap_err();
        assert!(err.to_string().contains("lacks 'uri'"));
    }

    #[test]
    fn test_resolve_location_keeps_absolute_and_urls() {
        let base = Path::new("/schemas");
        assert_eq!(resolve_location(base, "/abs/x.dtd"), "/abs/x.dtd");
        assert_eq!(
            resolve_location(base, "http://example.com/x.dtd"),
            "http://example.com/x.dtd"
        );
        assert_eq!(resolve_location(base, "../dtd/x.dtd"), "/dtd/x.dtd");
    }

    #[test]
    fn test_normalize_public_id() {
        assert_eq!(normalize_public_id("  -//A//DTD\tB//EN \n"), "-//A//DTD B//EN");
        assert_eq!(normalize_public_id("-//A//EN"), "-//A//EN");
        assert_eq!(normalize_public_id("   "), "");
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/catalog.xml")).unwrap_err();
        assert!(matches!(err, Error::CatalogParseFailed { .. }));
    }
}
