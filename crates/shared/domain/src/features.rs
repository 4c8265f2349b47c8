use crate::constants::ALL_FEATURES;
use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A capability setting tracked by the host application.
///
/// The textual name is the snake_case variant name (`voice_over`), both for
/// `Display`/`FromStr` and for serde.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    AssistiveTouch,
    BoldText,
    ClosedCaptioning,
    DarkerSystemColors,
    DifferentiateWithoutColor,
    Grayscale,
    GuidedAccess,
    HearingDevice,
    InvertColors,
    LargerText,
    MonoAudio,
    OnOffSwitchLabels,
    ReduceMotion,
    ReduceTransparency,
    ShakeToUndo,
    SpeakScreen,
    SpeakSelection,
    SwitchControl,
    VideoAutoplay,
    VoiceOver,
}

impl Feature {
    /// Whether the status is [`ENABLED`](crate::constants::ENABLED)/[`DISABLED`](crate::constants::DISABLED).
    ///
    /// `LargerText` reports a text size category instead.
    pub const fn is_boolean(self) -> bool {
        !matches!(self, Self::LargerText)
    }

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

bitflags! {
    /// A set of features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeatureSet: u32 {
        const ASSISTIVE_TOUCH = 1 << 0;
        const BOLD_TEXT = 1 << 1;
        const CLOSED_CAPTIONING = 1 << 2;
        const DARKER_SYSTEM_COLORS = 1 << 3;
        const DIFFERENTIATE_WITHOUT_COLOR = 1 << 4;
        const GRAYSCALE = 1 << 5;
        const GUIDED_ACCESS = 1 << 6;
        const HEARING_DEVICE = 1 << 7;
        const INVERT_COLORS = 1 << 8;
        const LARGER_TEXT = 1 << 9;
        const MONO_AUDIO = 1 << 10;
        const ON_OFF_SWITCH_LABELS = 1 << 11;
        const REDUCE_MOTION = 1 << 12;
        const REDUCE_TRANSPARENCY = 1 << 13;
        const SHAKE_TO_UNDO = 1 << 14;
        const SPEAK_SCREEN = 1 << 15;
        const SPEAK_SELECTION = 1 << 16;
        const SWITCH_CONTROL = 1 << 17;
        const VIDEO_AUTOPLAY = 1 << 18;
        const VOICE_OVER = 1 << 19;

        const ALL = (1 << 20) - 1;
    }
}

impl From<Feature> for FeatureSet {
    fn from(feature: Feature) -> Self {
        match feature {
            Feature::AssistiveTouch => Self::ASSISTIVE_TOUCH,
            Feature::BoldText => Self::BOLD_TEXT,
            Feature::ClosedCaptioning => Self::CLOSED_CAPTIONING,
            Feature::DarkerSystemColors => Self::DARKER_SYSTEM_COLORS,
            Feature::DifferentiateWithoutColor => Self::DIFFERENTIATE_WITHOUT_COLOR,
            Feature::Grayscale => Self::GRAYSCALE,
            Feature::GuidedAccess => Self::GUIDED_ACCESS,
            Feature::HearingDevice => Self::HEARING_DEVICE,
            Feature::InvertColors => Self::INVERT_COLORS,
            Feature::LargerText => Self::LARGER_TEXT,
            Feature::MonoAudio => Self::MONO_AUDIO,
            Feature::OnOffSwitchLabels => Self::ON_OFF_SWITCH_LABELS,
            Feature::ReduceMotion => Self::REDUCE_MOTION,
            Feature::ReduceTransparency => Self::REDUCE_TRANSPARENCY,
            Feature::ShakeToUndo => Self::SHAKE_TO_UNDO,
            Feature::SpeakScreen => Self::SPEAK_SCREEN,
            Feature::SpeakSelection => Self::SPEAK_SELECTION,
            Feature::SwitchControl => Self::SWITCH_CONTROL,
            Feature::VideoAutoplay => Self::VIDEO_AUTOPLAY,
            Feature::VoiceOver => Self::VOICE_OVER,
        }
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, feature| set | feature.into())
    }
}

impl From<u32> for FeatureSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl FeatureSet {
    /// Whether `feature` is part of the set.
    pub fn has(self, feature: Feature) -> bool {
        self.contains(feature.into())
    }

    /// Features in the set, in declaration order.
    pub fn features(self) -> impl Iterator<Item = Feature> {
        Feature::iter().filter(move |feature| self.has(*feature))
    }

    /// Parses a feature name, one of the "all" aliases or a decimal bit mask.
    ///
    /// # Errors
    /// Returns the offending name when it is none of these.
    pub fn parse_name(name: &str) -> Result<Self, String> {
        let name = name.trim();
        if ALL_FEATURES.contains(&name) {
            return Ok(Self::ALL);
        }
        if let Ok(bits) = name.parse::<u32>() {
            return Ok(Self::from_bits_truncate(bits));
        }
        Feature::from_str(name).map(Self::from).map_err(|_| name.to_owned())
    }

    /// Parses a comma separated list of [`parse_name`](Self::parse_name) items.
    ///
    /// Environment overrides carry lists this way (`voice_over,bold_text`).
    /// An empty string is the empty set.
    ///
    /// # Errors
    /// Returns the first item that does not parse.
    pub fn parse_list(list: &str) -> Result<Self, String> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .try_fold(Self::empty(), |set, item| Self::parse_name(item).map(|parsed| set | parsed))
    }
}

impl Serialize for FeatureSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureSetRepr {
    Bits(u32),
    Name(String),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let unknown = |name: String| D::Error::custom(format!("unknown feature '{name}'"));

        match FeatureSetRepr::deserialize(deserializer)? {
            FeatureSetRepr::Bits(bits) => Ok(Self::from_bits_truncate(bits)),
            FeatureSetRepr::Name(list) => Self::parse_list(&list).map_err(unknown),
            FeatureSetRepr::Names(names) => names.iter().try_fold(Self::empty(), |set, name| {
                Self::parse_name(name).map(|parsed| set | parsed).map_err(unknown)
            }),
        }
    }
}
