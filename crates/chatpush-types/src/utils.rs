//! Utility functions

use rand::RngExt;

pub const ID_LENGTH: usize = 20;
pub const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

/// Generate a random alphanumeric document id
pub fn random_id() -> String {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(ID_LENGTH);

	for _ in 0..ID_LENGTH {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	result
}

/// Join path segments with `/`, skipping empty segments
pub fn join_path(segments: &[&str]) -> String {
	segments.iter().filter(|s| !s.is_empty()).copied().collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_random_id() {
		let id1 = random_id();
		let id2 = random_id();
		assert_eq!(id1.len(), ID_LENGTH);
		assert_ne!(id1, id2);
		assert!(id1.chars().all(|c| c.is_ascii_alphanumeric()));
	}

	#[test]
	fn test_join_path() {
		assert_eq!(join_path(&["rooms", "r1", "messages"]), "rooms/r1/messages");
		assert_eq!(join_path(&["rooms", "", "messages"]), "rooms/messages");
	}
}

// vim: ts=4
