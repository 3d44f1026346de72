//! Parsing of `#[query(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed to the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Timestamp,
    Boolean,
    Tags,
}

impl FieldKind {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        let kind = match ident.to_string().as_str() {
            "text" => FieldKind::Text,
            "number" => FieldKind::Number,
            "timestamp" => FieldKind::Timestamp,
            "boolean" => FieldKind::Boolean,
            "tags" => FieldKind::Tags,
            _ => return None,
        };
        Some(kind)
    }
}

/// Field-level attributes from `#[query(...)]`.
#[derive(Debug, Clone)]
pub struct QueryAttr {
    pub kind: Option<FieldKind>,
    /// Include the field in the default free-text search.
    pub searchable: bool,
    pub skip: bool,
    /// Query name, when it differs from the Rust field name.
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for QueryAttr {
    fn default() -> Self {
        QueryAttr {
            kind: None,
            searchable: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

const EXPECTED: &str =
    "expected one of: text, number, timestamp, boolean, tags, searchable, skip, rename = \"...\"";

impl Parse for QueryAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = QueryAttr {
            span: input.span(),
            ..QueryAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("searchable") => attr.searchable = true,
                Meta::Path(p) => {
                    let ident = p
                        .get_ident()
                        .ok_or_else(|| Error::new(p.span(), EXPECTED))?;
                    let kind = FieldKind::from_ident(ident).ok_or_else(|| {
                        Error::new(
                            ident.span(),
                            format!("unknown query attribute '{}': {}", ident, EXPECTED),
                        )
                    })?;
                    if attr.kind.is_some() {
                        return Err(Error::new(ident.span(), "field kind given twice"));
                    }
                    attr.kind = Some(kind);
                    attr.span = ident.span();
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    match &nv.value {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) => attr.rename = Some(s.value()),
                        other => {
                            return Err(Error::new(
                                other.span(),
                                "rename must be a string literal",
                            ))
                        }
                    }
                }
                _ => return Err(Error::new(meta.span(), EXPECTED)),
            }
        }

        if attr.searchable && attr.kind.is_none() {
            return Err(Error::new(
                attr.span,
                "searchable fields need a kind, e.g. #[query(text, searchable)]",
            ));
        }

        Ok(attr)
    }
}

/// Extracts the `#[query(...)]` attribute of a field, if any.
pub fn parse_query_attrs(attrs: &[Attribute]) -> Result<QueryAttr> {
    match attrs.iter().find(|a| a.path().is_ident("query")) {
        Some(attr) => attr.parse_args::<QueryAttr>(),
        None => Ok(QueryAttr::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &str) -> Result<QueryAttr> {
        syn::parse_str::<QueryAttr>(tokens)
    }

    #[test]
    fn kinds() {
        assert_eq!(parse("text").unwrap().kind, Some(FieldKind::Text));
        assert_eq!(parse("number").unwrap().kind, Some(FieldKind::Number));
        assert_eq!(parse("timestamp").unwrap().kind, Some(FieldKind::Timestamp));
        assert_eq!(parse("boolean").unwrap().kind, Some(FieldKind::Boolean));
        assert_eq!(parse("tags").unwrap().kind, Some(FieldKind::Tags));
    }

    #[test]
    fn searchable_with_rename() {
        let attr = parse(r#"text, searchable, rename = "therapist""#).unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Text));
        assert!(attr.searchable);
        assert_eq!(attr.rename.as_deref(), Some("therapist"));
    }

    #[test]
    fn skip_alone() {
        let attr = parse("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn searchable_without_kind_is_rejected() {
        let err = parse("searchable").unwrap_err();
        assert!(err.to_string().contains("need a kind"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = parse("money").unwrap_err();
        assert!(err.to_string().contains("unknown query attribute 'money'"));
    }

    #[test]
    fn duplicate_kind_is_rejected() {
        assert!(parse("text, number").is_err());
    }

    #[test]
    fn rename_must_be_string() {
        assert!(parse("text, rename = 3").is_err());
    }
}
