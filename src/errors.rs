#[derive(Debug)]
pub enum MidiError {
	InputConnectError(midir::ConnectError<midir::MidiInput>),
	OutputConnectError(midir::ConnectError<midir::MidiOutput>),
	InitError(midir::InitError),
	PortInfoError(midir::PortInfoError),
	SendError(midir::SendError),
	InvalidAddress {
		// The rejected byte, which doesn't fit in a 7-bit data byte
		address: u8,
	},
}

impl std::fmt::Display for MidiError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InputConnectError(_) => f.write_str("connecting to MIDI input port failed"),
			Self::OutputConnectError(_) => f.write_str("connecting to MIDI output port failed"),
			Self::InitError(_) => f.write_str("MIDI context initialization failed"),
			Self::PortInfoError(_) => f.write_str("MIDI Port retrieval failed"),
			Self::SendError(_) => f.write_str("sending MIDI message failed"),
			Self::InvalidAddress { address } => write!(f, "{} is not a valid control address", address),
		}
	}
}

impl std::error::Error for MidiError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::InputConnectError(e) => Some(e),
			Self::OutputConnectError(e) => Some(e),
			Self::InitError(e) => Some(e),
			Self::PortInfoError(e) => Some(e),
			Self::SendError(e) => Some(e),
			Self::InvalidAddress { address: _ } => None,
		}
	}
}

impl From<midir::ConnectError<midir::MidiInput>> for MidiError {
	fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
		Self::InputConnectError(e)
	}
}

impl From<midir::ConnectError<midir::MidiOutput>> for MidiError {
	fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
		Self::OutputConnectError(e)
	}
}

impl From<midir::InitError> for MidiError {
	fn from(e: midir::InitError) -> Self {
		Self::InitError(e)
	}
}

impl From<midir::PortInfoError> for MidiError {
	fn from(e: midir::PortInfoError) -> Self {
		Self::PortInfoError(e)
	}
}

impl From<midir::SendError> for MidiError {
	fn from(e: midir::SendError) -> Self {
		Self::SendError(e)
	}
}

/// Returned by [`crate::studio::AddressTable::identity_of_button`] when the address doesn't belong
/// to any button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UnknownAddress(pub u8);

impl std::fmt::Display for UnknownAddress {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "no button is mapped to address {}", self.0)
	}
}

impl std::error::Error for UnknownAddress {}

/// Returned when parsing a [`crate::studio::ControlIdentity`] from a name that doesn't exist on
/// the device.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct UnknownControlName(pub String);

impl std::fmt::Display for UnknownControlName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "there is no control called {:?}", self.0)
	}
}

impl std::error::Error for UnknownControlName {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_address_message_names_the_byte() {
		let e = MidiError::InvalidAddress { address: 200 };
		assert_eq!(e.to_string(), "200 is not a valid control address");
		assert!(std::error::Error::source(&e).is_none());
	}

	#[test]
	fn unknown_address_message_names_the_byte() {
		assert_eq!(UnknownAddress(32).to_string(), "no button is mapped to address 32");
	}
}
