//! Overview command handler

use studytrack::config::Config;
use studytrack::info;

use crate::ui;

/// Print the program header and module overview for the stored degree program.
///
/// An unreadable document is reported and then treated like a missing one.
pub fn run(config: &Config) {
    let store = super::data_store(config);

    match super::load_or_fresh(&store) {
        Some(program) => {
            info!("Loaded program '{}'", program.name());
            print!("{}", ui::render_dashboard(&program));
            print!("{}", ui::render_module_table(&program));
        }
        None => println!("No degree program found. Run `studytrack dashboard` to create one."),
    }
}
