// src/session/tests.rs

//! Unit tests for command parsing and session event processing.

use super::*;
use crate::form::Field;
use crate::wall::Chain;

/// Session with small, fully valid form defaults.
fn new_session() -> Session {
    let mut config = Config::default();
    config.defaults.wall_width = 2;
    config.defaults.wall_height = 2;
    config.defaults.crate_width = 1;
    config.defaults.crate_height = 1;
    Session::new(config)
}

/// Runs a sequence of command lines, panicking on the first failure.
fn run(session: &mut Session, lines: &[&str]) {
    for line in lines {
        let input = parse_command(line)
            .unwrap_or_else(|e| panic!("parse failed for {:?}: {:#}", line, e))
            .unwrap_or_else(|| panic!("expected a command in {:?}", line));
        session
            .process(input)
            .unwrap_or_else(|e| panic!("process failed for {:?}: {:#}", line, e));
    }
}

mod parsing {
    use super::*;

    #[test_log::test]
    fn blank_lines_and_comments_are_skipped() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# a note").unwrap(), None);
    }

    #[test_log::test]
    fn commands_parse() {
        assert_eq!(
            parse_command("set wall-width 4").unwrap(),
            Some(SessionInput::SetField {
                field: Field::WallWidth,
                value: "4".to_string()
            })
        );
        assert_eq!(
            parse_command("layout Layout5").unwrap(),
            Some(SessionInput::SelectLayout(Layout::ColsRightStartBottom))
        );
        assert_eq!(
            parse_command("color #ff0080").unwrap(),
            Some(SessionInput::SelectColor(Rgb::new(0xff, 0x00, 0x80)))
        );
        assert_eq!(
            parse_command("paint 0 3 1 2").unwrap(),
            Some(SessionInput::Paint {
                wall: 0,
                crate_index: 3,
                row: 1,
                col: 2
            })
        );
        assert_eq!(
            parse_command("chain 0 1 -1").unwrap(),
            Some(SessionInput::SetChain {
                wall: 0,
                crate_index: 1,
                position: -1
            })
        );
        assert_eq!(
            parse_command("extra 0 1 on").unwrap(),
            Some(SessionInput::SetExtraPixel {
                wall: 0,
                crate_index: 1,
                enabled: true
            })
        );
        assert_eq!(
            parse_command("save 0").unwrap(),
            Some(SessionInput::Save { wall: 0 })
        );
        assert_eq!(parse_command("quit").unwrap(), Some(SessionInput::Quit));
    }

    #[test_log::test]
    fn unknown_layout_is_a_hard_error() {
        assert!(parse_command("layout Layout9").is_err());
        assert!(parse_command("relayout 0 0 snake").is_err());
    }

    #[test_log::test]
    fn malformed_arguments_are_rejected() {
        assert!(parse_command("bogus").is_err());
        assert!(parse_command("paint 0 0 1").is_err()); // missing col
        assert!(parse_command("paint 0 0 a b").is_err());
        assert!(parse_command("chain 0 0 1.5").is_err());
        assert!(parse_command("extra 0 0 maybe").is_err());
        assert!(parse_command("color 12345").is_err());
        assert!(parse_command("set depth 4").is_err());
    }
}

mod processing {
    use super::*;

    #[test_log::test]
    fn create_wall_is_blocked_until_the_form_is_valid() {
        let mut session = new_session();
        run(&mut session, &["set wall-width 0"]);
        assert!(session.process(SessionInput::CreateWall).is_err());
        assert!(session.walls().is_empty());

        run(&mut session, &["set wall-width 2", "wall"]);
        assert_eq!(session.form().status(Field::WallWidth), FieldStatus::Valid);
        assert_eq!(session.walls().len(), 1);
        assert_eq!(session.walls()[0].name(), "Wall 0");
        assert_eq!(session.walls()[0].crate_count(), 4);
    }

    #[test_log::test]
    fn paint_requires_an_included_crate() {
        let mut session = new_session();
        run(&mut session, &["wall"]);
        // All crates start excluded.
        let err = session
            .process(SessionInput::Paint {
                wall: 0,
                crate_index: 0,
                row: 0,
                col: 0,
            })
            .unwrap_err();
        assert!(err.to_string().contains("excluded"));

        run(&mut session, &["chain 0 0 0", "paint 0 0 0 0"]);
        let c = session.walls()[0].crate_at(0).unwrap();
        assert_eq!(c.pixel(0, 0).unwrap().color, session.active_color());
    }

    #[test_log::test]
    fn active_color_is_applied_at_paint_time() {
        let mut session = new_session();
        run(&mut session, &["wall", "chain 0 0 0", "paint 0 0 0 0"]);
        // Changing the palette afterwards must not repaint old pixels.
        run(&mut session, &["color #010203"]);
        let c = session.walls()[0].crate_at(0).unwrap();
        assert_eq!(c.pixel(0, 0).unwrap().color, DEFAULT_PAINT);

        run(&mut session, &["paint 0 0 0 0"]);
        let c = session.walls()[0].crate_at(0).unwrap();
        assert_eq!(c.pixel(0, 0).unwrap().color, Rgb::new(1, 2, 3));
    }

    #[test_log::test]
    fn chain_bound_is_the_crate_count() {
        let mut session = new_session();
        run(&mut session, &["wall"]); // 2x2 wall, 4 crates
        assert!(session
            .process(SessionInput::SetChain {
                wall: 0,
                crate_index: 0,
                position: 4,
            })
            .is_err());
        run(&mut session, &["chain 0 0 3", "chain 0 0 -1"]);
        assert_eq!(
            session.walls()[0].crate_at(0).unwrap().chain(),
            Chain::Excluded
        );
    }

    #[test_log::test]
    fn bad_indices_are_reported_not_fatal() {
        let mut session = new_session();
        run(&mut session, &["wall"]);
        assert!(session
            .process(SessionInput::Save { wall: 3 })
            .unwrap_err()
            .to_string()
            .contains("no wall 3"));
        assert!(session
            .process(SessionInput::SetChain {
                wall: 0,
                crate_index: 9,
                position: 0,
            })
            .unwrap_err()
            .to_string()
            .contains("no crate 9"));
        // Session still usable afterwards.
        run(&mut session, &["chain 0 0 0"]);
    }

    #[test_log::test]
    fn quit_shuts_the_session_down() {
        let mut session = new_session();
        assert_eq!(
            session.process(SessionInput::Quit).unwrap(),
            SessionStatus::Shutdown
        );
    }

    #[test_log::test]
    fn full_scenario_exports_the_expected_bytes() {
        let dir = std::env::temp_dir().join(format!(
            "cratelight-session-test-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = Config::default();
        config.output.directory = dir.clone();
        config.defaults.wall_width = 2;
        config.defaults.wall_height = 1;
        config.defaults.crate_width = 1;
        config.defaults.crate_height = 1;
        let mut session = Session::new(config);

        run(
            &mut session,
            &[
                "wall",
                // Wire the right crate first in the chain.
                "chain 0 1 0",
                "chain 0 0 1",
                "color #ff0000",
                "paint 0 0 0 0",
                "color #00ff00",
                "paint 0 1 0 0",
                "extra 0 1 on",
                "color #0000ff",
                "paint-extra 0 1",
                "save 0",
            ],
        );

        let path = dir.join("Wall 0_w2_h1_cw1_ch1.crate");
        let bytes = std::fs::read(&path).unwrap();
        // Crate 1 (chain 0): green pixel + blue extra pixel; crate 0 (chain 1): red.
        assert_eq!(bytes, vec![0, 255, 0, 0, 0, 255, 255, 0, 0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
