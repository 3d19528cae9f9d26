use knitkit_core::Gauge;
use knitkit_shaping::{Instruction, Panel, Trapezoid};

fn hat() -> Trapezoid {
    let crown = Trapezoid::new(3.4, 5.5, 0.2);
    Trapezoid::new(4.0, 22.0, 22.0).with_successors(vec![
        Trapezoid::new(10.0, 22.0, 22.0).with_successors(vec![crown; 4]),
    ])
}

#[test]
fn test_hat_body_lines() {
    let panel = Panel::new(hat(), Gauge::new(19.0, 30.0), 1.0);
    let lines = panel.generate_knitting_instructions();

    assert_eq!(lines[0], "Cast on 104 stitches.");
    assert_eq!(lines[1], "Knit 30 rows (RC=30, 104 sts in work).");
    assert_eq!(lines[2], "Knit 75 rows (RC=105, 104 sts in work).");
    assert_eq!(lines[3], "Divide into 4 sections:");
    assert_eq!(lines.len(), 4 + 4 * 15);
}

#[test]
fn test_hat_crown_sections() {
    let panel = Panel::new(hat(), Gauge::new(19.0, 30.0), 1.0);
    let lines = panel.generate_knitting_instructions();

    for (i, section) in lines[4..].chunks(15).enumerate() {
        assert_eq!(section[0], format!("Section {}: 26 stitches", i + 1));
        assert_eq!(
            section[1],
            "Decrease 1 stitch on the left. Decrease 1 stitch on the right. Knit 2 rows. (RC=107, 24 sts in work)"
        );
        assert_eq!(
            section[13],
            "Decrease 1 stitch on the left. Decrease 1 stitch on the right. Knit 2 rows. (RC=131, 0 sts in work)"
        );
        assert_eq!(section[14], "Bind off 0 stitches.");
    }
}

#[test]
fn test_hat_cast_on_splits_evenly() {
    let panel = Panel::new(hat(), Gauge::new(19.0, 30.0), 1.0);
    let plans = panel.stitch_plans();
    let first = plans[0].first().unwrap();
    assert_eq!((first.left_stitches, first.right_stitches), (52, 52));

    // root, body, then one plan per crown section
    assert_eq!(plans.len(), 6);
    for crown in &plans[2..] {
        assert_eq!(crown.len(), 26);
        assert_eq!(crown.first().unwrap().row_number, 106);
        assert_eq!(crown.last().unwrap().row_number, 131);
    }
}

#[test]
fn test_hat_typed_lines() {
    let panel = Panel::new(hat(), Gauge::new(19.0, 30.0), 1.0);
    let lines = panel.instructions();
    assert_eq!(lines[0], Instruction::CastOn { stitches: 104 });
    assert_eq!(
        lines[2],
        Instruction::KnitRows {
            rows: 75,
            row_counter: 105,
            stitches: 104
        }
    );
    assert_eq!(lines.iter().filter(|l| l.is_bind_off()).count(), 4);
}
