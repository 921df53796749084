//! Token generation command

use vellum_core::Credentials;

/// Implementation of the new-token command
///
/// Prints the pair in fixture syntax so it can be pasted into `[[tokens]]`.
pub fn execute() {
    let credentials = Credentials::generate();
    println!("id = \"{}\"", credentials.token_id);
    println!("secret = \"{}\"", credentials.secret);
}
