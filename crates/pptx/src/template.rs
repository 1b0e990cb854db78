//! Fixed package parts shared by every deck.
//!
//! Only the slides, `presentation.xml`, its relationships and the content
//! types vary per deck; everything here is static.

/// Relationship type URIs used by the package.
pub mod rel {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const VIEW_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
}

/// Content types of the package parts.
pub mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const PRES_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
    pub const VIEW_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
    pub const TABLE_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

/// XML namespaces written into generated parts.
pub mod ns {
    pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    pub const P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
    pub const RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    pub const CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
}

/// A static part: archive path, content type and body.
pub struct StaticPart {
    pub path: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

/// Static parts that carry an override in `[Content_Types].xml`.
pub const STATIC_PARTS: &[StaticPart] = &[
    StaticPart {
        path: "docProps/core.xml",
        content_type: content_type::CORE_PROPERTIES,
        body: include_str!("../resources/docProps/core.xml"),
    },
    StaticPart {
        path: "docProps/app.xml",
        content_type: content_type::EXTENDED_PROPERTIES,
        body: include_str!("../resources/docProps/app.xml"),
    },
    StaticPart {
        path: "ppt/slideMasters/slideMaster1.xml",
        content_type: content_type::SLIDE_MASTER,
        body: include_str!("../resources/slideMasters/slideMaster1.xml"),
    },
    StaticPart {
        path: "ppt/slideLayouts/slideLayout1.xml",
        content_type: content_type::SLIDE_LAYOUT,
        body: include_str!("../resources/slideLayouts/slideLayout1.xml"),
    },
    StaticPart {
        path: "ppt/theme/theme1.xml",
        content_type: content_type::THEME,
        body: include_str!("../resources/theme/theme1.xml"),
    },
    StaticPart {
        path: "ppt/presProps.xml",
        content_type: content_type::PRES_PROPS,
        body: include_str!("../resources/presProps.xml"),
    },
    StaticPart {
        path: "ppt/viewProps.xml",
        content_type: content_type::VIEW_PROPS,
        body: include_str!("../resources/viewProps.xml"),
    },
    StaticPart {
        path: "ppt/tableStyles.xml",
        content_type: content_type::TABLE_STYLES,
        body: include_str!("../resources/tableStyles.xml"),
    },
];

/// Static relationship parts (covered by the `rels` default content type).
pub const STATIC_RELS: &[(&str, &str)] = &[
    (
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        include_str!("../resources/slideMasters/_rels/slideMaster1.xml.rels"),
    ),
    (
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        include_str!("../resources/slideLayouts/_rels/slideLayout1.xml.rels"),
    ),
];
