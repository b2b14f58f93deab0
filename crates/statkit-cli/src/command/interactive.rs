use std::io;

use super::GlobalArgs;
use crate::session::Session;

pub(crate) fn run(global: &GlobalArgs) -> anyhow::Result<()> {
    let store = global.open_store()?;
    log::info!("starting interactive session");
    Session::new(
        io::stdin().lock(),
        io::stdout().lock(),
        store,
        global.show_steps(),
    )
    .run()
}
