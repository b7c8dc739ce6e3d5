use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection, MidiOutputPort};

use crate::MidiError;


/// Create a MIDI input context for connecting to a device. Timing and active sensing messages are
/// filtered out, but SysEx messages are let through - the device reports scene changes that way.
pub fn open_input() -> Result<MidiInput, MidiError> {
	let mut midi_input = MidiInput::new(crate::APPLICATION_NAME)?;
	midi_input.ignore(Ignore::TimeAndActiveSense);
	Ok(midi_input)
}

/// Create a MIDI output context for connecting to a device.
pub fn open_output() -> Result<MidiOutput, MidiError> {
	Ok(MidiOutput::new(crate::APPLICATION_NAME)?)
}

/// Something outgoing MIDI messages can be written to. Usually a [`MidiOutputConnection`]; a
/// `Vec<Vec<u8>>` records the messages instead, which is useful for testing.
pub trait MidiSink {
	fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), MidiError>;
}

impl MidiSink for MidiOutputConnection {
	fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
		self.send(bytes)?;
		Ok(())
	}
}

impl MidiSink for Vec<Vec<u8>> {
	fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
		self.push(bytes.to_vec());
		Ok(())
	}
}

pub trait OutputDevice where Self: Sized {
	const MIDI_CONNECTION_NAME: &'static str;

	/// Initiate from an existing midir connection.
	fn from_connection(connection: MidiOutputConnection) -> Result<Self, MidiError>;

	fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError>;

	/// Connect to the given port. Picking the port is up to the caller.
	fn from_port(midi_output: MidiOutput, port: &MidiOutputPort) -> Result<Self, MidiError> {
		let connection = midi_output.connect(port, Self::MIDI_CONNECTION_NAME)?;
		Self::from_connection(connection)
	}
}

pub struct InputDeviceHandler {
	#[allow(dead_code)]
	connection: MidiInputConnection<()>,
}

pub struct InputDeviceHandlerPolling<Message> {
	#[allow(dead_code)]
	connection: MidiInputConnection<()>,
	receiver: std::sync::mpsc::Receiver<Message>,
}

impl<Message> MsgPollingWrapper for InputDeviceHandlerPolling<Message> {
	type Message = Message;

	fn receiver(&self) -> &std::sync::mpsc::Receiver<Message> { &self.receiver }
}

/// Gives anything that holds a message receiver a set of convenient polling methods.
pub trait MsgPollingWrapper {
	type Message;

	fn receiver(&self) -> &std::sync::mpsc::Receiver<Self::Message>;

	/// Wait for a message to arrive, and return that. Returns `None` once the MIDI connection is
	/// gone. For a non-blocking variant, see `try_recv()`.
	fn recv(&self) -> Option<Self::Message> {
		self.receiver().recv().ok()
	}

	/// If there is a pending message, return that. Otherwise, return `None`.
	///
	/// This function does not block.
	fn try_recv(&self) -> Option<Self::Message> {
		self.receiver().try_recv().ok()
	}

	/// Receives a single message. If no message arrives within the timespan specified by `timeout`,
	/// `None` is returned.
	fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Self::Message> {
		self.receiver().recv_timeout(timeout).ok()
	}

	/// Returns an iterator over all arriving messages. The iterator will only return when the
	/// MIDI connection has been dropped.
	///
	/// For an iteration method that doesn't block, but returns immediately when there are no more
	/// pending messages, see `iter_pending`.
	fn iter(&self) -> std::sync::mpsc::Iter<'_, Self::Message> {
		self.receiver().iter()
	}

	/// Returns an iterator over the currently pending messages. As soon as all pending messages
	/// have been iterated over, the iterator will return.
	///
	/// For an iteration method that will block, waiting for new messages to arrive, see `iter()`.
	fn iter_pending(&self) -> std::sync::mpsc::TryIter<'_, Self::Message> {
		self.receiver().try_iter()
	}

	/// Drain any pending messages, e.g. control movements that queued up before the host was
	/// ready. Returns the number of messages that were discarded.
	fn drain(&self) -> usize {
		self.iter_pending().count()
	}
}

pub trait InputDevice {
	const MIDI_CONNECTION_NAME: &'static str;
	type Message;

	/// Decode a single raw message. Messages that don't mean anything to the device yield `None`.
	fn decode_message(timestamp: u64, data: &[u8]) -> Option<Self::Message>;

	/// Connect to the given port and call `user_callback` with every decoded message. Picking the
	/// port is up to the caller.
	#[must_use = "If not saved, the connection will be immediately dropped"]
	fn from_port<F>(midi_input: MidiInput, port: &MidiInputPort, mut user_callback: F)
			-> Result<InputDeviceHandler, MidiError>
			where F: FnMut(Self::Message) + Send + 'static, Self: 'static {

		let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
			if let Some(msg) = Self::decode_message(timestamp, data) {
				(user_callback)(msg);
			}
		};

		let connection = midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

		Ok(InputDeviceHandler { connection })
	}

	/// Connect to the given port and queue up decoded messages, to be picked up through the
	/// [`MsgPollingWrapper`] methods of the returned handler.
	#[must_use = "If not saved, the connection will be immediately dropped"]
	fn from_port_polling(midi_input: MidiInput, port: &MidiInputPort)
			-> Result<InputDeviceHandlerPolling<Self::Message>, MidiError>
			where Self: 'static, Self::Message: Send + 'static {

		let (sender, receiver) = std::sync::mpsc::channel();
		let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
			if let Some(msg) = Self::decode_message(timestamp, data) {
				if sender.send(msg).is_err() {
					log::debug!("Message receiver has hung up, dropping message");
				}
			}
		};

		let connection = midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

		Ok(InputDeviceHandlerPolling { connection, receiver })
	}
}
