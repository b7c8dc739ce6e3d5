use midir::MidiOutputConnection;

use super::{ControlAddress, ControlIdentity, Input, Message, Output};
use crate::{InputDevice, MidiError, MidiSink};

/// What the host knows about the device. Nothing of this survives a restart.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DeviceState {
	/// `None` until the device reported a scene or the host set one
	pub current_scene: Option<u8>,
}

/// Ties an [`Output`] to the state the device is in.
///
/// Incoming messages are handed to [`Router::handle_message`] one at a time, in the order they
/// arrived. If the messages are decoded elsewhere already (e.g. by an input handler created with
/// [`InputDevice::from_port_polling`]), pass them to [`Router::observe`] instead.
///
/// ```
/// use nanokontrol::studio::{Message, Output, Router};
///
/// let mut router = Router::new(Output::new(Vec::<Vec<u8>>::new()));
/// let msg = router.handle_message(0, &[0xF0, 0x42, 0x40, 0, 1, 0x37, 0, 0, 0, 0, 2, 0xF7]);
/// assert_eq!(msg, Some(Message::SceneChanged { scene: 3 }));
/// assert_eq!(router.current_scene(), Some(3));
/// ```
pub struct Router<S = MidiOutputConnection> {
	output: Output<S>,
	state: DeviceState,
}

impl<S: MidiSink> Router<S> {
	pub fn new(output: Output<S>) -> Self {
		Self { output, state: DeviceState::default() }
	}

	/// Decode a raw incoming message and update the device state accordingly. Messages that don't
	/// mean anything to the device yield `None` and leave the state untouched.
	pub fn handle_message(&mut self, timestamp: u64, data: &[u8]) -> Option<Message> {
		let msg = Input::decode_message(timestamp, data)?;
		self.observe(&msg);
		Some(msg)
	}

	/// Update the device state with an already decoded message.
	pub fn observe(&mut self, msg: &Message) {
		if let Message::SceneChanged { scene } = *msg {
			self.state.current_scene = Some(scene);
		}
	}

	pub fn current_scene(&self) -> Option<u8> {
		self.state.current_scene
	}

	pub fn state(&self) -> DeviceState {
		self.state
	}

	/// Switch the device to the given scene, counted from 1. The scene is remembered even if
	/// sending fails.
	pub fn set_scene(&mut self, scene: u8) -> Result<(), MidiError> {
		self.state.current_scene = Some(scene);
		self.output.change_scene(scene)
	}

	/// See [`Output::light`]
	pub fn light(&mut self, address: ControlAddress, on: bool) -> Result<(), MidiError> {
		self.output.light(address, on)
	}

	/// See [`Output::light_control`]
	pub fn light_control(&mut self, control: ControlIdentity, on: bool) -> Result<(), MidiError> {
		self.output.light_control(control, on)
	}

	pub fn output(&mut self) -> &mut Output<S> { &mut self.output }

	pub fn into_output(self) -> Output<S> { self.output }
}
