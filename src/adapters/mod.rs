// Adapters layer: concrete collaborator implementations. Production systems
// bind the domain ports to their own billing entities; the in-memory pair
// here backs the demo binaries and the test suites.

pub mod memory;
