//! Behavioural properties of fixture traces

use proptest::prelude::*;
use transpiler_cases::fixture::{Bindings, Branch, CountDown, Fixture};
use transpiler_cases::trace::expected_trace;

fn fixture(bindings: Bindings, start: i64, lower: i64, step: u32) -> Fixture {
    Fixture::new("prop", step)
        .with_bindings(bindings)
        .with_count_down(CountDown { start, lower })
}

proptest! {
    #[test]
    fn prop_exactly_one_branch_prints(a in -3i64..3, b in -3i64..3, c in -3i64..3) {
        let bindings = Bindings { a, b, c };
        let trace = expected_trace(&fixture(bindings, 10, 0, 1)).unwrap();

        let printed: Vec<_> = Branch::ALL
            .iter()
            .filter(|branch| trace.lines().iter().any(|l| l == branch.message()))
            .collect();
        prop_assert_eq!(printed.len(), 1);

        let expected = if a == b {
            Branch::EqualToB
        } else if a == c {
            Branch::EqualToC
        } else {
            Branch::NotEqual
        };
        prop_assert_eq!(*printed[0], expected);
        prop_assert_eq!(&trace.lines()[0], expected.message());
    }

    #[test]
    fn prop_while_and_do_while_agree(lower in 0i64..50, span in 0i64..50) {
        let trace = expected_trace(&fixture(Bindings::default(), lower + span, lower, 1)).unwrap();
        prop_assert_eq!(trace.section("while"), trace.section("do while"));
        prop_assert_eq!(trace.section("while").len(), usize::try_from(span + 1).unwrap());
    }

    #[test]
    fn prop_for_visits_arithmetic_sequence(step in 1u32..15) {
        let trace = expected_trace(&fixture(Bindings::default(), 10, 0, step)).unwrap();
        let visited: Vec<i64> = trace
            .section("for")
            .iter()
            .map(|l| l.parse().unwrap())
            .collect();

        let mut expected = Vec::new();
        let mut i = 10i64;
        while i >= 0 {
            expected.push(i);
            i -= i64::from(step);
        }
        prop_assert_eq!(&visited, &expected);
        prop_assert_eq!(visited.last() == Some(&0), 10 % step == 0);
        prop_assert!(visited.iter().all(|v| *v >= 0));
    }

    #[test]
    fn prop_rerun_is_identical(step in 1u32..12, start in 0i64..20) {
        let fixture = fixture(Bindings::default(), start, 0, step);
        let first = expected_trace(&fixture).unwrap().to_stdout();
        let second = expected_trace(&fixture).unwrap().to_stdout();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_builtin_traces() {
    let step_two = expected_trace(&Fixture::statements_step_two()).unwrap();
    assert_eq!(step_two.lines()[0], "not equal to b or c");
    assert_eq!(step_two.section("while").len(), 11);
    assert_eq!(step_two.section("do while").len(), 11);
    assert_eq!(step_two.section("for"), ["10", "8", "6", "4", "2", "0"]);

    let step_one = expected_trace(&Fixture::statements_step_one()).unwrap();
    assert_eq!(step_one.section("for"), step_one.section("while"));
}
