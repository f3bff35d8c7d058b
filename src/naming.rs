//! Structured artifact identifiers and their display-string encoding.
//!
//! Every annotation artifact carries an [`ArtifactId`]: the grouping key of
//! the logical annotation it belongs to plus its [`Role`] inside that
//! annotation. The id is built once when the artifact is created and is
//! written to the node both as structured metadata and as the node name.
//!
//! The name grammar is
//!
//! ```text
//! {kind}-{qualifier}:{instance}-{role}
//!
//! plane-drag:3-line
//! hole-d175:1724050026681-cable
//! ranging-measure:4-delete-icon
//! ```
//!
//! Group containers use the key alone (`plane-drag:3`). The role is
//! everything after the second `-`, so hyphenated roles survive decoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnnotateError;

/// Interaction that produced a cross-section annotation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Rebuilt live while a handle is being dragged.
    Drag,
    /// Created at setup time from two double-clicked corners.
    DoubleClick,
}

impl EventType {
    /// Token used inside node names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::DoubleClick => "dblclick",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "drag" => Some(Self::Drag),
            "dblclick" => Some(Self::DoubleClick),
            _ => None,
        }
    }
}

/// Part an artifact plays inside its annotation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Coloured disc marking the cable inside a hole.
    Cable,
    /// Text label showing a dimension or a diameter.
    Size,
    /// Torus outlining a hole; the draggable handle of a hole.
    HoleRing,
    /// Outline or measuring line.
    Line,
    /// Direction indicator of a cross-section.
    Direction,
    /// Dismiss affordance of a ranging.
    DeleteIcon,
    /// Marker at the first corner of a section.
    StartPoint,
    /// Marker at the opposite corner; the draggable handle of a section.
    EndPoint,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Cable,
        Self::Size,
        Self::HoleRing,
        Self::Line,
        Self::Direction,
        Self::DeleteIcon,
        Self::StartPoint,
        Self::EndPoint,
    ];

    /// Token used inside node names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cable => "cable",
            Self::Size => "size",
            Self::HoleRing => "hole-ring",
            Self::Line => "line",
            Self::Direction => "direction",
            Self::DeleteIcon => "delete-icon",
            Self::StartPoint => "start-point",
            Self::EndPoint => "end-point",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == token)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity shared by every artifact of one logical annotation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupKey {
    /// A rectangular cross-section, keyed by its page number.
    Section {
        /// How this generation of the section was produced.
        event: EventType,
        /// Page (section sequence) number.
        page: u32,
    },
    /// A circular pipe penetration.
    Hole {
        /// Nominal diameter in millimetres.
        diameter_mm: u32,
        /// Instance id, unique while the hole exists.
        hole: u64,
    },
    /// A two-point distance measurement.
    Ranging {
        /// Ranging sequence number.
        ranging: u32,
    },
}

impl GroupKey {
    /// Page number when this is a section key.
    #[must_use]
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Section { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Pair this key with a role.
    #[must_use]
    pub fn with_role(self, role: Role) -> ArtifactId {
        ArtifactId { key: self, role }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Section { .. } => "plane",
            Self::Hole { .. } => "hole",
            Self::Ranging { .. } => "ranging",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Self::Section { event, page } => {
                write!(f, "{kind}-{}:{page}", event.as_str())
            }
            Self::Hole { diameter_mm, hole } => {
                write!(f, "{kind}-d{diameter_mm}:{hole}")
            }
            Self::Ranging { ranging } => write!(f, "{kind}-measure:{ranging}"),
        }
    }
}

impl FromStr for GroupKey {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(s).ok_or_else(|| AnnotateError::InvalidName(s.to_owned()))
    }
}

fn parse_key(s: &str) -> Option<GroupKey> {
    let (kind, token) = s.split_once('-')?;
    let (qualifier, instance) = token.split_once(':')?;
    match kind {
        "plane" => Some(GroupKey::Section {
            event: EventType::parse(qualifier)?,
            page: instance.parse().ok()?,
        }),
        "hole" => Some(GroupKey::Hole {
            diameter_mm: qualifier.strip_prefix('d')?.parse().ok()?,
            hole: instance.parse().ok()?,
        }),
        "ranging" if qualifier == "measure" => Some(GroupKey::Ranging {
            ranging: instance.parse().ok()?,
        }),
        _ => None,
    }
}

/// Full identity of one artifact: grouping key plus role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct ArtifactId {
    /// Annotation this artifact belongs to.
    pub key: GroupKey,
    /// Part it plays inside the annotation.
    pub role: Role,
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key, self.role)
    }
}

impl FromStr for ArtifactId {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).ok_or_else(|| AnnotateError::InvalidName(s.to_owned()))
    }
}

/// Format an artifact id into its node name.
#[must_use]
pub fn encode(id: &ArtifactId) -> String {
    id.to_string()
}

/// Recover an artifact id from a node name.
///
/// Returns `None` for anything that does not follow the grammar, including
/// bare group-container names.
#[must_use]
pub fn decode(name: &str) -> Option<ArtifactId> {
    let (kind, rest) = name.split_once('-')?;
    let (token, role) = rest.split_once('-')?;
    let key = parse_key(&name[..kind.len() + 1 + token.len()])?;
    Some(ArtifactId {
        key,
        role: Role::parse(role)?,
    })
}

/// Recover the grouping key from either an artifact or a container name.
#[must_use]
pub fn decode_key(name: &str) -> Option<GroupKey> {
    decode(name).map(|id| id.key).or_else(|| parse_key(name))
}
