//! CLI formatting utilities.

mod headers;
mod output;
mod status;

pub use headers::{print_section_header, SectionStyle};
pub use output::print_key_value;
pub use status::{print_success, print_warning};
