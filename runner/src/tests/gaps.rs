use core::module_path;
use function_name::named;

use super::{run, simulate};

#[test]
#[named]
pub fn idle_between_arrivals() {
    let output = simulate(&[(1, 0, 2), (2, 5, 3), (3, 6, 1)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &output,
    );
}
