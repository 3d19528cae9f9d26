//! Structural properties of generated instructions over random shape trees.

use knitkit_core::Gauge;
use knitkit_shaping::{Instruction, PlanContext, Trapezoid};
use proptest::prelude::*;

fn gauge() -> impl Strategy<Value = Gauge> {
    (10.0f64..40.0, 10.0f64..50.0).prop_map(|(s, r)| Gauge::new(s, r))
}

fn context() -> impl Strategy<Value = PlanContext> {
    (gauge(), 0.8f64..1.2).prop_map(|(g, m)| PlanContext::new(g, m))
}

/// Trees whose zero-height nodes are always leaves, as authored garments are
fn shape_tree() -> impl Strategy<Value = Trapezoid> {
    let leaf = (
        prop_oneof![Just(0.0), 0.5f64..6.0],
        0.5f64..20.0,
        0.0f64..20.0,
        -2.0f64..2.0,
    )
        .prop_map(|(h, a, b, o)| Trapezoid::new(h, a, b).with_offset(o));

    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            0.5f64..6.0,
            0.5f64..20.0,
            0.0f64..20.0,
            prop::collection::vec(inner, 1..5),
        )
            .prop_map(|(h, a, b, successors)| Trapezoid::new(h, a, b).with_successors(successors))
    })
}

fn leaves(t: &Trapezoid) -> usize {
    if t.successors.is_empty() {
        1
    } else {
        t.successors.iter().map(leaves).sum()
    }
}

fn branching_nodes(t: &Trapezoid) -> usize {
    let own = usize::from(t.successors.len() >= 2);
    own + t.successors.iter().map(branching_nodes).sum::<usize>()
}

fn assert_contiguous_paths(t: &Trapezoid, ctx: &PlanContext, start_row: u32) {
    let plan = t.stitch_plan(ctx, start_row);
    if let Some(first) = plan.first() {
        assert_eq!(first.row_number, start_row);
    }
    for pair in plan.rows().windows(2) {
        assert_eq!(pair[0].row_number + 1, pair[1].row_number);
    }
    let next = plan.last().map_or(start_row, |r| r.row_number + 1);
    for successor in t.successors.iter().filter(|s| s.height > 0.0) {
        assert_contiguous_paths(successor, ctx, next);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_leaf_ends_in_one_bind_off(tree in shape_tree(), ctx in context()) {
        let lines = tree.generate_instructions(&ctx, 1, true);
        let bind_offs = lines.iter().filter(|l| l.is_bind_off()).count();
        prop_assert_eq!(bind_offs, leaves(&tree));
    }

    #[test]
    fn divide_headers_match_branching_nodes(tree in shape_tree(), ctx in context()) {
        let lines = tree.generate_instructions(&ctx, 1, true);
        let divides = lines
            .iter()
            .filter(|l| matches!(l, Instruction::Divide { .. }))
            .count();
        prop_assert_eq!(divides, branching_nodes(&tree));
    }

    #[test]
    fn rows_are_contiguous_along_paths(tree in shape_tree(), ctx in context()) {
        assert_contiguous_paths(&tree, &ctx, 1);
    }

    #[test]
    fn compiled_lines_cover_every_row(tree in shape_tree(), ctx in context()) {
        for plan in tree.stitch_plans(&ctx, 1) {
            let covered: u32 = plan.compile().iter().filter_map(Instruction::rows).sum();
            prop_assert_eq!(covered as usize, plan.len());
        }
    }

    #[test]
    fn rectangles_compile_to_one_line(
        height in 0.5f64..10.0,
        width in 0.5f64..30.0,
        ctx in context(),
    ) {
        let plan = Trapezoid::new(height, width, width).stitch_plan(&ctx, 1);
        let lines = plan.compile();
        prop_assert_eq!(lines.len(), 1);
        let is_knit_rows = matches!(lines[0], Instruction::KnitRows { .. });
        prop_assert!(is_knit_rows);
        let first = *plan.first().unwrap();
        prop_assert!(plan.rows().iter().all(|r| r.total() == first.total()));
    }

    #[test]
    fn shaping_sums_match_edge_deltas(
        height in 0.5f64..10.0,
        base_a in 0.0f64..30.0,
        base_b in 0.0f64..30.0,
        offset in -3.0f64..3.0,
        ctx in context(),
    ) {
        let t = Trapezoid::new(height, base_a, base_b).with_offset(offset);
        let plan = t.stitch_plan(&ctx, 1);
        let (left, right) = t.edge_deltas(&ctx);
        prop_assert_eq!(plan.total_left_shaping(), left);
        prop_assert_eq!(plan.total_right_shaping(), right);
    }

    #[test]
    fn generation_is_deterministic(tree in shape_tree(), ctx in context()) {
        prop_assert_eq!(
            tree.generate_knitting_instructions(&ctx, 1, true),
            tree.generate_knitting_instructions(&ctx, 1, true)
        );
    }

    #[test]
    fn zero_height_nodes_add_no_rows(
        width in 0.5f64..30.0,
        ctx in context(),
    ) {
        let lines = Trapezoid::new(0.0, width, width).generate_instructions(&ctx, 1, true);
        prop_assert_eq!(lines.len(), 1);
        let is_bind_off = matches!(lines[0], Instruction::BindOff { .. });
        prop_assert!(is_bind_off);
    }
}
