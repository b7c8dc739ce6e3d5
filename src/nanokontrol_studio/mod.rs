/*!
# nanoKONTROL Studio low-level API

The nanoKONTROL Studio has eight lanes, each with a rotary, a slider and four buttons (Mute, Solo,
Rec, Select), plus a transport section and a jog wheel. Every button has an LED that can be
switched on and off by the host.

Controls are addressed by a single byte on the wire. Most addresses follow a simple per-lane
pattern, but not all of them - see [`TABLE`] for the complete layout. [`Input`] turns raw messages
into [`Message`]s, [`Output`] builds and sends the outgoing ones, and [`Router`] ties both together
and keeps track of the active scene.
*/

mod controls;
pub use controls::*;

mod input;
pub use input::*;

mod output;
pub use output::*;

mod router;
pub use router::*;

pub(crate) const LANE_COUNT: usize = 8;

/// The number of scenes the device can store
pub const SCENE_COUNT: u8 = 5;

/// One of the eight lanes (channel strips), counted from the left starting at zero
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane(u8);

impl Lane {
	pub fn new(index: u8) -> Self {
		assert!((index as usize) < LANE_COUNT);
		Self(index)
	}

	pub fn index(self) -> usize { self.0 as usize }

	/// All lanes from left to right
	pub fn all() -> impl Iterator<Item = Lane> {
		(0..LANE_COUNT as u8).map(Self)
	}
}

impl From<u8> for Lane {
	fn from(index: u8) -> Self {
		Lane::new(index)
	}
}

/// The direction the jog wheel was turned in
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JogwheelDirection {
	/// Counter-clockwise
	Left,
	/// Clockwise
	Right,
}

impl JogwheelDirection {
	/// The jog wheel is a relative encoder: values below 64 mean clockwise, everything else
	/// counter-clockwise.
	pub fn from_value(value: u8) -> Self {
		if value < JOG_PIVOT { Self::Right } else { Self::Left }
	}
}

pub(crate) const JOG_PIVOT: u8 = 64;

/// Values the device uses for buttons and button LEDs
pub struct PressStatus;

impl PressStatus {
	pub const OFF: u8 = 0;
	pub const ON: u8 = 127;
}

/// Step from `current` to the neighbouring scene in `direction`, wrapping around at both ends.
/// When no scene is known yet, scene 1 is assumed.
pub fn next_scene(current: Option<u8>, direction: JogwheelDirection) -> u8 {
	let current = current.unwrap_or(1);
	match direction {
		JogwheelDirection::Left if current <= 1 => SCENE_COUNT,
		JogwheelDirection::Left => current - 1,
		JogwheelDirection::Right if current >= SCENE_COUNT => 1,
		JogwheelDirection::Right => current + 1,
	}
}
