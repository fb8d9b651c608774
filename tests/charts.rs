use pretty_assertions::assert_eq;
use sm_rs::sm::prelude::*;

#[test]
fn hold_spans_half_a_measure() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-single:
     :
     MEDIUM:
     4:
     :
2000
0000
3000
0000
;
";
    let SmOutput { song, warnings } = parse_sm(source).expect("must be parsed");

    assert_eq!(warnings, vec![]);
    let notes = &song.dance_tracks["dance-single"][&DanceDifficulty::Medium].notes;
    // Half a measure at 120 BPM is one second.
    assert_eq!(
        notes,
        &vec![Note {
            kind: NoteKind::HoldBegin,
            lane: 0,
            begin: 0.0,
            end: 1.0,
        }]
    );
}

#[test]
fn two_charts_share_a_style() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-single:
     first:
     EASY:
     2:
     :
1000
;
#NOTES:
     dance-single:
     second:
     HARD:
     7:
     :
0001
;
";
    let SmOutput { song, warnings } = parse_sm(source).expect("must be parsed");

    assert_eq!(warnings, vec![]);
    let style = &song.dance_tracks["dance-single"];
    assert_eq!(style.len(), 2);
    assert_eq!(style[&DanceDifficulty::Easy].description, "first");
    assert_eq!(style[&DanceDifficulty::Hard].description, "second");
}

#[test]
fn duplicate_chart_replaces_and_warns() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-single:
     first:
     EASY:
     2:
     :
1000
;
#NOTES:
     dance-single:
     second:
     EASY:
     2:
     :
0001
;
";
    let SmOutput { song, warnings } = parse_sm(source).expect("must be parsed");

    let style = &song.dance_tracks["dance-single"];
    assert_eq!(style.len(), 1);
    assert_eq!(style[&DanceDifficulty::Easy].description, "second");
    assert_eq!(
        warnings,
        vec![SmWarning::DuplicateChart {
            style: "dance-single".to_owned(),
            difficulty: DanceDifficulty::Easy,
        }]
    );
}

#[test]
fn unrecognized_difficulty_files_under_unknown() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-single:
     :
     SMANIAC:
     10:
     :
1000
;
";
    let SmOutput { song, warnings } = parse_sm(source).expect("must be parsed");

    assert!(song.dance_tracks["dance-single"].contains_key(&DanceDifficulty::Unknown));
    assert_eq!(
        warnings,
        vec![SmWarning::UnknownDifficulty {
            name: "SMANIAC".to_owned(),
            line: 7,
        }]
    );
}

#[test]
fn bpm_change_stretches_the_second_measure() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120,4=60;
#NOTES:
     dance-single:
     :
     HARD:
     6:
     :
1000
0000
,
1000
0000
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");
    let notes = &song.dance_tracks["dance-single"][&DanceDifficulty::Hard].notes;

    // Measure one runs at 120 BPM (two seconds), measure two at 60 BPM
    // (four seconds).
    assert_eq!(notes[0].begin, 0.0);
    assert_eq!(notes[1].begin, 2.0);
}

#[test]
fn a_stop_delays_following_measures() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#STOPS:2=0.5;
#NOTES:
     dance-single:
     :
     HARD:
     6:
     :
1000
,
1000
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");
    let notes = &song.dance_tracks["dance-single"][&DanceDifficulty::Hard].notes;

    assert_eq!(notes[0].begin, 0.0);
    // The stop sits inside measure one and holds the clock for half a
    // second, so measure two starts late.
    assert_eq!(notes[1].begin, 2.5);
}

#[test]
fn comments_and_blanks_inside_a_grid_are_skipped() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-single:
     :
     EASY:
     2:
     :
// intro
1000

0100
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");
    let notes = &song.dance_tracks["dance-single"][&DanceDifficulty::Easy].notes;

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].lane, 0);
    assert_eq!(notes[1].lane, 1);
    assert_eq!(notes[1].begin, 1.0);
}

#[test]
fn chord_notes_share_a_time_and_order_by_lane() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-double:
     :
     CHALLENGE:
     11:
     :
10011010
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");
    let notes = &song.dance_tracks["dance-double"][&DanceDifficulty::Challenge].notes;

    let lanes: Vec<usize> = notes.iter().map(|note| note.lane).collect();
    assert_eq!(lanes, vec![0, 3, 4, 6]);
    assert!(notes.iter().all(|note| note.begin == 0.0));
}
