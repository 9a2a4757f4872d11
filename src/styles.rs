//! Catalog of the visual styles the beautify service understands.

use serde::Serialize;

/// A selectable visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Identifier sent to the service as `style`
    pub id: &'static str,

    /// Display name, as shown in the service's UI
    pub name: &'static str,

    pub description: &'static str,

    /// Icon key for previews
    pub preview_icon: &'static str,

    pub is_default: bool,
}

const STYLES: &[Style] = &[
    Style {
        id: "minimal-glass",
        name: "简约玻璃",
        description: "清爽通透的玻璃感设计",
        preview_icon: "glass",
        is_default: true,
    },
    Style {
        id: "tech-blue",
        name: "科技蓝",
        description: "现代科技感蓝色主题",
        preview_icon: "tech",
        is_default: false,
    },
    Style {
        id: "future-glow",
        name: "未来流光",
        description: "未来感科技流光效果",
        preview_icon: "glow",
        is_default: false,
    },
    Style {
        id: "dark-elegant",
        name: "暗黑优雅",
        description: "高端沉稳的暗色主题",
        preview_icon: "dark",
        is_default: false,
    },
    Style {
        id: "gradient-dream",
        name: "梦幻渐变",
        description: "柔和多彩的渐变风格",
        preview_icon: "gradient",
        is_default: false,
    },
    Style {
        id: "nature-fresh",
        name: "自然清新",
        description: "灵感源于自然的清新设计",
        preview_icon: "nature",
        is_default: false,
    },
];

/// Every style, in catalog order.
pub fn all() -> &'static [Style] {
    STYLES
}

/// The style flagged as default, or the first entry if none is flagged.
pub fn default_style() -> &'static Style {
    STYLES
        .iter()
        .find(|style| style.is_default)
        .unwrap_or(&STYLES[0])
}

/// Look up a style by id. Unknown ids yield `None`, never the default.
pub fn style_by_id(id: &str) -> Option<&'static Style> {
    STYLES.iter().find(|style| style.id == id)
}
