use super::{Lane, LANE_COUNT};
use crate::{MidiError, UnknownAddress, UnknownControlName};

/// The wire address of a single control. This is the second byte of every 3-byte message the
/// nanoKONTROL Studio sends or receives, so it only goes up to 127.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlAddress(u8);

impl ControlAddress {
	pub const fn new(address: u8) -> Self {
		assert!(address < 128);
		Self(address)
	}

	pub fn get(self) -> u8 { self.0 }
}

impl std::convert::TryFrom<u8> for ControlAddress {
	type Error = MidiError;

	fn try_from(address: u8) -> Result<Self, MidiError> {
		match address {
			0..=127 => Ok(Self(address)),
			_ => Err(MidiError::InvalidAddress { address }),
		}
	}
}

impl From<ControlAddress> for u8 {
	fn from(address: ControlAddress) -> Self {
		address.0
	}
}

/// The transport section buttons, left of the lanes
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transport {
	Cycle,
	Set,
	MarkerPrev,
	MarkerNext,
	Rewind,
	Fastforward,
	TrackPrev,
	TrackNext,
	Previous,
	Stop,
	Play,
	Record,
}

impl Transport {
	pub const ALL: [Transport; 12] = [
		Self::Cycle, Self::Set, Self::MarkerPrev, Self::MarkerNext, Self::Rewind,
		Self::Fastforward, Self::TrackPrev, Self::TrackNext, Self::Previous, Self::Stop,
		Self::Play, Self::Record,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Cycle => "Cycle",
			Self::Set => "Set",
			Self::MarkerPrev => "MarkerPrev",
			Self::MarkerNext => "MarkerNext",
			Self::Rewind => "Rewind",
			Self::Fastforward => "Fastforward",
			Self::TrackPrev => "TrackPrev",
			Self::TrackNext => "TrackNext",
			Self::Previous => "Previous",
			Self::Stop => "Stop",
			Self::Play => "Play",
			Self::Record => "Record",
		}
	}
}

/// The four buttons every lane has
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneRole {
	Mute,
	Solo,
	Rec,
	Select,
}

impl LaneRole {
	pub const ALL: [LaneRole; 4] = [Self::Mute, Self::Solo, Self::Rec, Self::Select];

	pub fn name(self) -> &'static str {
		match self {
			Self::Mute => "Mute",
			Self::Solo => "Solo",
			Self::Rec => "Rec",
			Self::Select => "Select",
		}
	}
}

/// Names one physical control on the device.
///
/// Identities print and parse as `Play`, `Lane3.Mute`, `Rotary5`, `Slider0` and `Jogwheel`:
/// ```
/// # use nanokontrol::studio::{ControlIdentity, Lane, LaneRole};
/// let control: ControlIdentity = "Lane3.Mute".parse()?;
/// assert_eq!(control, ControlIdentity::LaneControl { lane: Lane::new(3), role: LaneRole::Mute });
/// assert_eq!(control.to_string(), "Lane3.Mute");
/// # Ok::<(), nanokontrol::UnknownControlName>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlIdentity {
	Transport(Transport),
	LaneControl { lane: Lane, role: LaneRole },
	Rotary(Lane),
	Slider(Lane),
	Jogwheel,
}

impl ControlIdentity {
	/// Whether this control sends press/release messages (and can be lit)
	pub fn is_button(self) -> bool {
		matches!(self, Self::Transport(_) | Self::LaneControl { .. })
	}
}

impl std::fmt::Display for ControlIdentity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Transport(transport) => f.write_str(transport.name()),
			Self::LaneControl { lane, role } => write!(f, "Lane{}.{}", lane.index(), role.name()),
			Self::Rotary(lane) => write!(f, "Rotary{}", lane.index()),
			Self::Slider(lane) => write!(f, "Slider{}", lane.index()),
			Self::Jogwheel => f.write_str("Jogwheel"),
		}
	}
}

impl std::str::FromStr for ControlIdentity {
	type Err = UnknownControlName;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		fn parse_lane(s: &str) -> Option<Lane> {
			match s.parse::<u8>() {
				Ok(index) if (index as usize) < LANE_COUNT => Some(Lane::new(index)),
				_ => None,
			}
		}

		let unknown = || UnknownControlName(s.to_owned());

		if s == "Jogwheel" {
			return Ok(Self::Jogwheel);
		}
		if let Some(&transport) = Transport::ALL.iter().find(|t| t.name() == s) {
			return Ok(Self::Transport(transport));
		}
		if let Some(rest) = s.strip_prefix("Lane") {
			let (lane, role) = rest.split_once('.').ok_or_else(unknown)?;
			let lane = parse_lane(lane).ok_or_else(unknown)?;
			let &role = LaneRole::ALL.iter().find(|r| r.name() == role).ok_or_else(unknown)?;
			return Ok(Self::LaneControl { lane, role });
		}
		if let Some(rest) = s.strip_prefix("Rotary") {
			return parse_lane(rest).map(Self::Rotary).ok_or_else(unknown);
		}
		if let Some(rest) = s.strip_prefix("Slider") {
			return parse_lane(rest).map(Self::Slider).ok_or_else(unknown);
		}

		Err(unknown())
	}
}

/// Lane button addresses before the Solo shift, indexed by `LaneRole as usize`
const LANE_BASE: [u8; 4] = [21, 29, 38, 46];
const ROTARY_BASE: u8 = 13;
const SLIDER_BASE: u8 = 2;

/// From this lane on, Solo sits one above the pattern. The device keeps address 32 free
const SOLO_SHIFT_FIRST_LANE: usize = 3;

/// Sliders that don't follow `SLIDER_BASE + lane`, as `(lane, address)`
const SLIDER_OVERRIDES: [(usize, u8); 3] = [(5, 8), (6, 9), (7, 12)];

/// Indexed by `Transport as usize`
const TRANSPORT_ADDRESSES: [u8; 12] = [54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 80, 81];
const JOGWHEEL_ADDRESS: u8 = 82;

/// The complete address layout of the nanoKONTROL Studio. There is exactly one, [`TABLE`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AddressTable {
	lanes: [[u8; 4]; LANE_COUNT],
	transport: [u8; 12],
	rotaries: [u8; LANE_COUNT],
	sliders: [u8; LANE_COUNT],
	jogwheel: u8,
}

/// The address table of the device, computed at compile time
pub static TABLE: AddressTable = AddressTable::build();

impl AddressTable {
	const fn build() -> Self {
		let mut lanes = [[0; 4]; LANE_COUNT];
		let mut rotaries = [0; LANE_COUNT];
		let mut sliders = [0; LANE_COUNT];

		let mut lane = 0;
		while lane < LANE_COUNT {
			let mut role = 0;
			while role < LANE_BASE.len() {
				lanes[lane][role] = LANE_BASE[role] + lane as u8;
				role += 1;
			}
			rotaries[lane] = ROTARY_BASE + lane as u8;
			sliders[lane] = SLIDER_BASE + lane as u8;
			lane += 1;
		}

		let mut lane = SOLO_SHIFT_FIRST_LANE;
		while lane < LANE_COUNT {
			lanes[lane][LaneRole::Solo as usize] += 1;
			lane += 1;
		}

		let mut i = 0;
		while i < SLIDER_OVERRIDES.len() {
			let (lane, address) = SLIDER_OVERRIDES[i];
			sliders[lane] = address;
			i += 1;
		}

		Self { lanes, transport: TRANSPORT_ADDRESSES, rotaries, sliders, jogwheel: JOGWHEEL_ADDRESS }
	}

	pub fn address_of(&self, control: ControlIdentity) -> ControlAddress {
		let address = match control {
			ControlIdentity::Transport(transport) => self.transport[transport as usize],
			ControlIdentity::LaneControl { lane, role } => self.lanes[lane.index()][role as usize],
			ControlIdentity::Rotary(lane) => self.rotaries[lane.index()],
			ControlIdentity::Slider(lane) => self.sliders[lane.index()],
			ControlIdentity::Jogwheel => self.jogwheel,
		};
		ControlAddress(address)
	}

	/// All buttons with their addresses. Transport buttons come first, then the lanes in order.
	pub fn buttons(&self) -> impl Iterator<Item = (ControlIdentity, ControlAddress)> + '_ {
		let transport = Transport::ALL.iter().map(|&t| ControlIdentity::Transport(t));
		let lanes = Lane::all().flat_map(|lane| {
			LaneRole::ALL.iter().map(move |&role| ControlIdentity::LaneControl { lane, role })
		});

		transport.chain(lanes).map(move |control| (control, self.address_of(control)))
	}

	pub fn is_button_address(&self, address: ControlAddress) -> bool {
		self.buttons().any(|(_, a)| a == address)
	}

	pub fn identity_of_button(&self, address: ControlAddress) -> Result<ControlIdentity, UnknownAddress> {
		self.buttons()
			.find(|&(_, a)| a == address)
			.map(|(control, _)| control)
			.ok_or(UnknownAddress(address.0))
	}

	pub fn lane_of_rotary(&self, address: ControlAddress) -> Option<Lane> {
		position(&self.rotaries, address)
	}

	pub fn lane_of_slider(&self, address: ControlAddress) -> Option<Lane> {
		position(&self.sliders, address)
	}

	pub fn jogwheel(&self) -> ControlAddress {
		ControlAddress(self.jogwheel)
	}
}

fn position(addresses: &[u8; LANE_COUNT], address: ControlAddress) -> Option<Lane> {
	addresses.iter().position(|&a| a == address.0).map(|index| Lane::new(index as u8))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	fn lane_button(lane: u8, role: LaneRole) -> ControlIdentity {
		ControlIdentity::LaneControl { lane: Lane::new(lane), role }
	}

	#[test]
	fn buttons_round_trip() {
		let mut count = 0;
		for (control, address) in TABLE.buttons() {
			assert_eq!(TABLE.identity_of_button(address), Ok(control), "{}", control);
			count += 1;
		}
		assert_eq!(count, 12 + 8 * 4);
	}

	#[test]
	fn button_addresses_distinct() {
		let addresses: HashSet<_> = TABLE.buttons().map(|(_, a)| a).collect();
		assert_eq!(addresses.len(), 12 + 8 * 4);
	}

	#[test]
	fn address_classes_disjoint() {
		let mut seen = HashSet::new();
		let controls = TABLE.buttons().map(|(control, _)| control)
			.chain(Lane::all().map(ControlIdentity::Rotary))
			.chain(Lane::all().map(ControlIdentity::Slider))
			.chain(std::iter::once(ControlIdentity::Jogwheel));

		for control in controls {
			let address = TABLE.address_of(control);
			assert!(seen.insert(address), "{} collides at {:?}", control, address);
		}
	}

	#[test]
	fn solo_shifted_from_lane_three() {
		for lane in 0..3u8 {
			assert_eq!(TABLE.address_of(lane_button(lane, LaneRole::Solo)).get(), 29 + lane);
		}
		for lane in 3..8u8 {
			assert_eq!(TABLE.address_of(lane_button(lane, LaneRole::Solo)).get(), 29 + lane + 1);
		}
		assert!(!TABLE.is_button_address(ControlAddress::new(32)));
	}

	#[test]
	fn other_lane_buttons_follow_the_pattern() {
		for lane in 0..8u8 {
			assert_eq!(TABLE.address_of(lane_button(lane, LaneRole::Mute)).get(), 21 + lane);
			assert_eq!(TABLE.address_of(lane_button(lane, LaneRole::Rec)).get(), 38 + lane);
			assert_eq!(TABLE.address_of(lane_button(lane, LaneRole::Select)).get(), 46 + lane);
		}
	}

	#[test]
	fn slider_overrides() {
		let sliders: Vec<u8> = Lane::all()
			.map(|lane| TABLE.address_of(ControlIdentity::Slider(lane)).get())
			.collect();
		assert_eq!(sliders, [2, 3, 4, 5, 6, 8, 9, 12]);
	}

	#[test]
	fn rotaries_follow_the_pattern() {
		for lane in Lane::all() {
			let address = TABLE.address_of(ControlIdentity::Rotary(lane));
			assert_eq!(address.get(), 13 + lane.index() as u8);
			assert_eq!(TABLE.lane_of_rotary(address), Some(lane));
		}
		assert_eq!(TABLE.lane_of_rotary(ControlAddress::new(21)), None);
	}

	#[test]
	fn slider_lane_lookup() {
		assert_eq!(TABLE.lane_of_slider(ControlAddress::new(12)), Some(Lane::new(7)));
		assert_eq!(TABLE.lane_of_slider(ControlAddress::new(7)), None);
		assert_eq!(TABLE.lane_of_slider(ControlAddress::new(10)), None);
	}

	#[test]
	fn fixed_addresses() {
		assert_eq!(TABLE.address_of(ControlIdentity::Transport(Transport::Cycle)).get(), 54);
		assert_eq!(TABLE.address_of(ControlIdentity::Transport(Transport::Stop)).get(), 63);
		assert_eq!(TABLE.address_of(ControlIdentity::Transport(Transport::Play)).get(), 80);
		assert_eq!(TABLE.address_of(ControlIdentity::Transport(Transport::Record)).get(), 81);
		assert_eq!(TABLE.jogwheel().get(), 82);
		assert!(!TABLE.is_button_address(TABLE.jogwheel()));
	}

	#[test]
	fn unknown_button_address() {
		assert_eq!(TABLE.identity_of_button(ControlAddress::new(13)), Err(UnknownAddress(13)));
		assert_eq!(TABLE.identity_of_button(ControlAddress::new(127)), Err(UnknownAddress(127)));
	}

	#[test]
	fn address_conversion() {
		use std::convert::TryFrom;

		assert_eq!(ControlAddress::try_from(127).map(u8::from).ok(), Some(127));
		assert!(matches!(
			ControlAddress::try_from(128),
			Err(MidiError::InvalidAddress { address: 128 })
		));
	}

	#[test]
	fn names_parse_back() {
		let controls = TABLE.buttons().map(|(control, _)| control)
			.chain(Lane::all().map(ControlIdentity::Rotary))
			.chain(Lane::all().map(ControlIdentity::Slider))
			.chain(std::iter::once(ControlIdentity::Jogwheel));

		for control in controls {
			assert_eq!(control.to_string().parse::<ControlIdentity>(), Ok(control));
		}
	}

	#[test]
	fn bad_names_rejected() {
		for name in ["", "Lane8.Mute", "Lane3", "Lane3.Loud", "Rotary", "Slider9", "play"] {
			assert_eq!(
				name.parse::<ControlIdentity>(),
				Err(UnknownControlName(name.to_owned())),
				"{:?}", name,
			);
		}
	}
}
