use serde::{Deserialize, Serialize};
use tilewalk_engine::{MovementPolicy, SessionConfig};

pub(crate) const BASE_TITLE: &str = "Hero movement";
pub(crate) const TORUS_TITLE: &str = "Hero movement. New level";

/// The three demo programs that share one engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Variant {
    #[default]
    BoundedCamera,
    Torus,
    BoundedStatic,
}

impl Variant {
    pub(crate) const ALL: [Variant; 3] = [
        Variant::BoundedCamera,
        Variant::Torus,
        Variant::BoundedStatic,
    ];

    pub(crate) fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.label() == name.trim().to_ascii_lowercase())
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Variant::BoundedCamera => "bounded_camera",
            Variant::Torus => "torus",
            Variant::BoundedStatic => "bounded_static",
        }
    }

    pub(crate) fn policy(self) -> MovementPolicy {
        match self {
            Variant::Torus => MovementPolicy::Toroidal,
            Variant::BoundedCamera | Variant::BoundedStatic => MovementPolicy::Bounded,
        }
    }

    pub(crate) fn camera_enabled(self) -> bool {
        !matches!(self, Variant::BoundedStatic)
    }

    pub(crate) fn window_title(self) -> &'static str {
        match self {
            Variant::Torus => TORUS_TITLE,
            Variant::BoundedCamera | Variant::BoundedStatic => BASE_TITLE,
        }
    }

    /// Session preset for this variant; layout and viewport come from config.
    pub(crate) fn session_config(self) -> SessionConfig {
        SessionConfig {
            policy: self.policy(),
            camera_enabled: self.camera_enabled(),
            ..SessionConfig::default()
        }
    }
}
