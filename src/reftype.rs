use std::fmt;

/// Semantic role of a section, carrying its display label.
///
/// The label becomes the XHTML `<title>` and the navigation label; the tag is
/// the `type` written to the package guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceType {
    Acknowledgements(String),
    Bibliography(String),
    Colophon(String),
    Copyright(String),
    Cover(String),
    Dedication(String),
    Epigraph(String),
    Foreword(String),
    Glossary(String),
    Index(String),
    Loi(String),
    Lot(String),
    Notes(String),
    Preface(String),
    Text(String),
    TitlePage(String),
    Toc(String),
}

impl ReferenceType {
    pub fn tag(&self) -> &'static str {
        self.parts().0
    }

    pub fn label(&self) -> &str {
        self.parts().1
    }

    /// Builds a reference type from its guide tag, e.g. `title-page`.
    pub fn from_tag(tag: &str, label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        let reftype = match tag.trim().to_ascii_lowercase().as_str() {
            "acknowledgements" => Self::Acknowledgements(label),
            "bibliography" => Self::Bibliography(label),
            "colophon" => Self::Colophon(label),
            "copyright-page" | "copyright" => Self::Copyright(label),
            "cover" => Self::Cover(label),
            "dedication" => Self::Dedication(label),
            "epigraph" => Self::Epigraph(label),
            "foreword" => Self::Foreword(label),
            "glossary" => Self::Glossary(label),
            "index" => Self::Index(label),
            "loi" => Self::Loi(label),
            "lot" => Self::Lot(label),
            "notes" => Self::Notes(label),
            "preface" => Self::Preface(label),
            "text" => Self::Text(label),
            "title-page" => Self::TitlePage(label),
            "toc" => Self::Toc(label),
            _ => return None,
        };
        Some(reftype)
    }

    fn parts(&self) -> (&'static str, &str) {
        match self {
            Self::Acknowledgements(s) => ("acknowledgements", s),
            Self::Bibliography(s) => ("bibliography", s),
            Self::Colophon(s) => ("colophon", s),
            Self::Copyright(s) => ("copyright-page", s),
            Self::Cover(s) => ("cover", s),
            Self::Dedication(s) => ("dedication", s),
            Self::Epigraph(s) => ("epigraph", s),
            Self::Foreword(s) => ("foreword", s),
            Self::Glossary(s) => ("glossary", s),
            Self::Index(s) => ("index", s),
            Self::Loi(s) => ("loi", s),
            Self::Lot(s) => ("lot", s),
            Self::Notes(s) => ("notes", s),
            Self::Preface(s) => ("preface", s),
            Self::Text(s) => ("text", s),
            Self::TitlePage(s) => ("title-page", s),
            Self::Toc(s) => ("toc", s),
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
