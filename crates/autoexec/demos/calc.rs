//! calc: `add` and `subtract` as sub-commands.
//!
//! `calc subtract --a=10 --b=3` prints `-5.0`.

mod arithmetic;

use anyhow::Result;

fn main() -> Result<()> {
    arithmetic::init_tracing();

    let functions = [arithmetic::add(), arithmetic::subtract()];
    let result = autoexec::execute_functions(&functions)?;
    println!("{}", autoexec::display_value(&result));
    Ok(())
}
