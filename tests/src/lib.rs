//! End-to-end tests of the discovery pipeline against stubbed collaborators.

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod stubs;
