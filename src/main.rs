//! Anchor and composite tools for UFO font sources.
//!
//! Places marks on their bases through anchor pairs, sets ligature
//! components side by side, and reports on the anchors of a font.

use anchor_tool::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
