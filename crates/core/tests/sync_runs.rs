use mgcbsync_core::registry::read_registered;
use mgcbsync_core::{ContentSync, SyncConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const HEADER: &str = "\
#----------------------------- Global Properties ----------------------------#

/outputDir:bin/$(Platform)
/intermediateDir:obj/$(Platform)
/platform:DesktopGL
/config:
/profile:Reach
/compress:False

#---------------------------------- Content ---------------------------------#
";

const HERO_STANZA: &str = "\
#begin art/hero.png
/importer:TextureImporter
/processor:TextureProcessor
/processorParam:ColorKeyColor=255,0,255,255
/processorParam:ColorKeyEnabled=False
/processorParam:GenerateMipmaps=False
/processorParam:PremultiplyAlpha=True
/processorParam:ResizeToPowerOfTwo=False
/processorParam:MakeSquare=False
/processorParam:TextureFormat=Color
/build:art/hero.png
";

const JUMP_STANZA: &str = "\
#begin sounds/sfx/jump.wav
/importer:WavImporter
/processor:SoundEffectProcessor
/processorParam:Quality=Best
/build:sounds/sfx/jump.wav
";

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn setup_content(root: &Path) -> ContentSync {
    let content = root.join("content");
    touch(&content, "art/hero.png");
    touch(&content, "sounds/sfx/jump.wav");
    ContentSync::new(SyncConfig::new(&content)).unwrap()
}

#[test]
fn test_empty_mgcb_gets_both_stanzas_sorted() {
    let dir = tempdir().unwrap();
    let sync = setup_content(dir.path());
    fs::write(sync.mgcb_path(), "").unwrap();

    let report = sync.run().unwrap();
    assert_eq!(report.added, vec!["art/hero.png", "sounds/sfx/jump.wav"]);
    assert!(report.skipped.is_empty());

    let text = fs::read_to_string(sync.mgcb_path()).unwrap();
    assert_eq!(text, format!("\n{}\n{}", HERO_STANZA, JUMP_STANZA));
}

#[test]
fn test_existing_stanza_is_not_duplicated() {
    let dir = tempdir().unwrap();
    let sync = setup_content(dir.path());
    let original = format!("{}\n{}", HEADER, HERO_STANZA);
    fs::write(sync.mgcb_path(), &original).unwrap();

    let report = sync.run().unwrap();
    assert_eq!(report.added, vec!["sounds/sfx/jump.wav"]);

    let text = fs::read_to_string(sync.mgcb_path()).unwrap();
    assert!(text.starts_with(&original), "existing content must be kept as-is");
    assert_eq!(&text[original.len()..], format!("\n{}", JUMP_STANZA));
}

#[test]
fn test_second_run_finds_nothing_new() {
    let dir = tempdir().unwrap();
    let sync = setup_content(dir.path());

    let first = sync.run().unwrap();
    assert_eq!(first.added.len(), 2);
    let after_first = fs::read_to_string(sync.mgcb_path()).unwrap();

    let plan = sync.plan().unwrap();
    assert!(plan.is_empty());

    let second = sync.apply(&plan).unwrap();
    assert!(second.added.is_empty());
    assert_eq!(fs::read_to_string(sync.mgcb_path()).unwrap(), after_first);
}

#[test]
fn test_missing_mgcb_is_created() {
    let dir = tempdir().unwrap();
    let sync = setup_content(dir.path());
    assert!(!sync.mgcb_path().exists());

    let report = sync.run().unwrap();
    assert_eq!(report.added.len(), 2);
    assert!(sync.mgcb_path().exists());
}

#[test]
fn test_sound_outside_sfx_is_never_registered() {
    let dir = tempdir().unwrap();
    let content = dir.path().join("content");
    touch(&content, "sounds/music/theme.wav");
    touch(&content, "voice.wav");
    touch(&content, "sounds/sfx/hit.wav");

    let sync = ContentSync::new(SyncConfig::new(&content)).unwrap();
    let report = sync.run().unwrap();
    assert_eq!(report.added, vec!["sounds/sfx/hit.wav"]);

    let registered = read_registered(&sync.mgcb_path()).unwrap();
    assert_eq!(registered.len(), 1);
    assert!(registered.contains("sounds/sfx/hit.wav"));
}

#[test]
fn test_reparse_after_run_matches_disk() {
    let dir = tempdir().unwrap();
    let sync = setup_content(dir.path());
    fs::write(sync.mgcb_path(), HEADER).unwrap();
    sync.run().unwrap();

    let first = read_registered(&sync.mgcb_path()).unwrap();
    let second = read_registered(&sync.mgcb_path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, sync.plan().unwrap().discovered);
}

#[test]
fn test_custom_mgcb_location() {
    let dir = tempdir().unwrap();
    let content = dir.path().join("content");
    touch(&content, "art/hero.png");
    let mgcb = dir.path().join("Game.mgcb");

    let sync = ContentSync::new(SyncConfig::new(&content).with_mgcb_file(&mgcb)).unwrap();
    sync.run().unwrap();

    assert!(mgcb.exists());
    assert!(!content.join("content.mgcb").exists());
}
