//! Declarative host attributes and the construction-time echo window
//!
//! Host frameworks that drive the viewer declaratively re-deliver every
//! attribute present at construction as an ordinary change notification
//! right after setup. Those echoes must be swallowed once, per attribute,
//! or every construction-time effect would run twice. The reactor tracks
//! this with an explicit two-phase state: while it is
//! [`ReactorPhase::Initializing`] each armed attribute absorbs exactly one
//! notification, and once every echo has drained the reactor moves to
//! [`ReactorPhase::Steady`] where every notification is a real change, even
//! one that re-sets an attribute to its construction-time value.

/// The attributes the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerAttribute {
    /// Source path of the model to display.
    Model,
    /// Name of a lighting preset.
    Preset,
    /// Flat color override for every mesh material.
    BaseColor,
}

impl ViewerAttribute {
    pub const ALL: [ViewerAttribute; 3] = [
        ViewerAttribute::Model,
        ViewerAttribute::Preset,
        ViewerAttribute::BaseColor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ViewerAttribute::Model => "model",
            ViewerAttribute::Preset => "preset",
            ViewerAttribute::BaseColor => "base_color",
        }
    }

    pub fn from_name(name: &str) -> Option<ViewerAttribute> {
        ViewerAttribute::ALL
            .into_iter()
            .find(|attribute| attribute.name() == name)
    }
}

/// Attribute values present when the viewer is constructed.
#[derive(Debug, Clone, Default)]
pub struct InitialAttributes {
    pub model: Option<String>,
    pub preset: Option<String>,
    pub base_color: Option<String>,
}

impl InitialAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, source: &str) -> Self {
        self.model = Some(source.to_string());
        self
    }

    pub fn with_preset(mut self, name: &str) -> Self {
        self.preset = Some(name.to_string());
        self
    }

    pub fn with_base_color(mut self, color: &str) -> Self {
        self.base_color = Some(color.to_string());
        self
    }
}

/// One pending echo per attribute that was present at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AttributeEchoes {
    model: bool,
    preset: bool,
    base_color: bool,
}

impl AttributeEchoes {
    /// Arms an echo for every attribute carrying a construction-time value.
    pub(crate) fn arm(attributes: &InitialAttributes) -> Self {
        Self {
            model: attributes.model.is_some(),
            preset: attributes.preset.is_some(),
            base_color: attributes.base_color.is_some(),
        }
    }

    /// Absorbs the echo for `attribute` if one is armed.
    ///
    /// # Returns
    /// `true` when the notification was an echo and must be ignored.
    pub(crate) fn consume(&mut self, attribute: ViewerAttribute) -> bool {
        let slot = match attribute {
            ViewerAttribute::Model => &mut self.model,
            ViewerAttribute::Preset => &mut self.preset,
            ViewerAttribute::BaseColor => &mut self.base_color,
        };
        std::mem::take(slot)
    }

    pub(crate) fn any_armed(&self) -> bool {
        self.model || self.preset || self.base_color
    }
}

/// Where the attribute reactor is in its two-phase lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReactorPhase {
    /// Construction-time attributes may still be echoed back by the host.
    Initializing(AttributeEchoes),
    /// All echoes drained; every notification is a real change.
    Steady,
}
