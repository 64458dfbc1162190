// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod conversion;

#[cfg(test)]
mod properties;

#[cfg(test)]
mod treeviz;
