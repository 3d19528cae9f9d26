use knitkit_core::{Error, Gauge, PatternError};
use knitkit_shaping::{Garment, Instruction};

const HAT: &str = include_str!("../../../../demos/seam-top-hat.json");
const SWEATER: &str = include_str!("../../../../demos/cozy-raglan-sweater.json");

#[test]
fn test_hat_pattern() {
    let garment = Garment::from_json_str(HAT).unwrap();
    assert_eq!(garment.permalink, "seam-top-hat");
    let size = garment.size("One Size").unwrap();
    let pattern = garment.generate_pattern(Gauge::new(19.0, 30.0), size);

    assert_eq!(pattern.title, "Seam-Top Hat");
    assert_eq!(pattern.panels.len(), 1);
    assert_eq!(pattern.finishing_steps.len(), 3);

    let hat: Vec<String> = pattern.panels[0]
        .instructions
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(hat[2], "Hang hem.");
    assert_eq!(hat[4], "Divide into 4 sections:");
    assert_eq!(hat[5], "Section 1: 26 stitches");
    assert_eq!(
        hat[6],
        "Decrease 1 stitch on the left. Decrease 1 stitch on the right. Knit 3 rows. (RC=108, 24 sts in work)"
    );
    assert_eq!(
        hat[7],
        "Decrease 1 stitch on the left. Decrease 1 stitch on the right. Knit 2 rows. (RC=110, 22 sts in work)"
    );
    assert_eq!(
        hat[18],
        "Decrease 1 stitch on the left. Decrease 1 stitch on the right. Knit 2 rows. (RC=135, 0 sts in work)"
    );
    assert_eq!(hat[19], "Bind off 0 stitches.");
    assert_eq!(hat.len(), 5 + 4 * 15);
}

#[test]
fn test_sweater_sizes_keep_document_order() {
    let garment = Garment::from_json_str(SWEATER).unwrap();
    let labels: Vec<&str> = garment.sizes.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "men's small / women's medium",
            "men's medium / women's large",
            "men's large / women's XL",
        ]
    );
    let names: Vec<&str> = garment.shapes.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Front", "Back", "Sleeves (make 2)"]);
}

#[test]
fn test_sweater_front_sections() {
    let garment = Garment::from_json_str(SWEATER).unwrap();
    let size = garment.size("men's medium / women's large").unwrap();
    let pattern = garment.generate_pattern(Gauge::new(19.0, 30.0), size);
    let front = &pattern.panels[0];
    assert_eq!(front.name, "Front");

    let lines = &front.instructions;
    assert_eq!(lines[0], Instruction::CastOn { stitches: 119 });
    assert_eq!(
        lines[3],
        Instruction::KnitRows {
            rows: 150,
            row_counter: 180,
            stitches: 119
        }
    );
    assert_eq!(lines[4], Instruction::Divide { sections: 5 });
    assert_eq!(
        lines[5],
        Instruction::SectionBindOff {
            index: 1,
            stitches: 5
        }
    );
    assert_eq!(
        lines[6],
        Instruction::Section {
            index: 2,
            stitches: 48
        }
    );

    let section_headers = lines
        .iter()
        .filter(|l| matches!(l, Instruction::Section { .. } | Instruction::SectionBindOff { .. }))
        .count();
    assert_eq!(section_headers, 5);
    // three straight bind-offs plus one at the top of each shaped section
    assert_eq!(lines.iter().filter(|l| l.is_bind_off()).count(), 5);
}

#[test]
fn test_every_panel_starts_with_cast_on() {
    let garment = Garment::from_json_str(SWEATER).unwrap();
    for (label, size) in &garment.sizes {
        let pattern = garment.generate_pattern(Gauge::default(), *size);
        for panel in &pattern.panels {
            assert!(
                matches!(panel.instructions[0], Instruction::CastOn { .. }),
                "{} at {}",
                panel.name,
                label
            );
        }
    }
}

#[test]
fn test_unknown_size_lists_choices() {
    let garment = Garment::from_json_str(HAT).unwrap();
    match garment.size("XXL") {
        Err(Error::Pattern(PatternError::UnknownSize { label, available })) => {
            assert_eq!(label, "XXL");
            assert_eq!(available, "One Size");
        }
        other => panic!("unexpected {:?}", other),
    }
}
