use pretty_assertions::assert_eq;
use sm_rs::sm::prelude::*;

#[test]
fn header_only_file_has_no_note_data() {
    let result = parse_sm("#TITLE:X;\n#ARTIST:Y;\n");

    assert_eq!(result, Err(SmError::NoNoteData));
    assert_eq!(
        result.expect_err("must fail").to_string(),
        "no note data in the file"
    );
}

#[test]
fn empty_title_fails_even_with_charts() {
    let source = "\
#ARTIST:Y;
#BPMS:0=120;
#NOTES:
     dance-single:
     :
     EASY:
     1:
     :
1000
;
";
    assert_eq!(parse_sm(source), Err(SmError::MissingHeaderFields));
}

#[test]
fn notes_tag_followed_by_nothing_is_fatal() {
    assert_eq!(
        parse_sm("#NOTES:\n"),
        Err(SmError::MissingNoteData { line: 1 })
    );
}

#[test]
fn truncated_preamble_is_fatal() {
    let source = "#TITLE:X;\n#NOTES:\n     dance-single:\n     desc:\n";
    assert_eq!(
        parse_sm(source),
        Err(SmError::MissingNoteData { line: 4 })
    );
}

#[test]
fn unknown_tags_are_reported_not_fatal() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#GLITTER:lots;
#SELECTABLE:YES;
#NOTES:
     dance-single:
     :
     EASY:
     1:
     :
1000
;
";
    let SmOutput { warnings, .. } = parse_sm(source).expect("must be parsed");

    // #SELECTABLE belongs to the format and passes silently.
    assert_eq!(
        warnings,
        vec![SmWarning::UnknownTag {
            name: "GLITTER".to_owned(),
            line: 4,
        }]
    );
}

#[test]
fn offset_becomes_the_negated_gap() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#OFFSET:0.123;
#BPMS:0=120;
#NOTES:
     dance-single:
     :
     EASY:
     1:
     :
1000
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");
    assert_eq!(song.gap, -0.123);
}

#[test]
fn decimal_commas_are_accepted() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#OFFSET:0,5;
#BPMS:0=120;
#NOTES:
     dance-single:
     :
     EASY:
     1:
     :
1000
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");
    assert_eq!(song.gap, -0.5);
}

#[test]
fn bpms_record_segments_and_base() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0.000=120,4.000=60;
#NOTES:
     dance-single:
     :
     EASY:
     1:
     :
1000
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");

    assert_eq!(song.tempo.base_bpm(), Some(120.0));
    assert_eq!(
        song.tempo.bpm_changes(),
        &[
            BpmChange {
                beat: 0.0,
                bpm: 120.0
            },
            BpmChange {
                beat: 16.0,
                bpm: 60.0
            },
        ]
    );
}

#[test]
fn stops_are_exported_as_song_time() {
    let source = "\
#TITLE:X;
#ARTIST:Y;
#BPMS:0=120;
#STOPS:1=0.5,2=0.25;
#NOTES:
     dance-single:
     :
     EASY:
     1:
     :
1000
;
";
    let SmOutput { song, .. } = parse_sm(source).expect("must be parsed");

    assert_eq!(
        song.stops,
        vec![
            Stop {
                time: 0.5,
                seconds: 0.5,
            },
            Stop {
                time: 1.5,
                seconds: 0.25,
            },
        ]
    );
}
