//! Renders MGCB build stanzas.

use crate::config::{AssetGroup, AssetTypeTable, ProcessorParam};
use std::fmt;

/// One `#begin ... /build:...` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza<'a> {
    pub asset: &'a str,
    pub importer: &'a str,
    pub processor: &'a str,
    pub params: &'a [ProcessorParam],
}

impl<'a> Stanza<'a> {
    pub fn new(asset: &'a str, group: &'a AssetGroup) -> Self {
        Self {
            asset,
            importer: &group.importer,
            processor: &group.processor,
            params: &group.params,
        }
    }
}

impl fmt::Display for Stanza<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#begin {}", self.asset)?;
        writeln!(f, "/importer:{}", self.importer)?;
        writeln!(f, "/processor:{}", self.processor)?;
        for param in self.params {
            writeln!(f, "/processorParam:{}={}", param.key, param.value)?;
        }
        writeln!(f, "/build:{}", self.asset)
    }
}

/// Render the stanza for `asset`, or `None` when its extension is unknown.
pub fn generate_entry(asset: &str, table: &AssetTypeTable) -> Option<String> {
    let group = table.group_for(asset)?;
    Some(Stanza::new(asset, group).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_entry() {
        let entry = generate_entry("sounds/sfx/jump.wav", AssetTypeTable::standard()).unwrap();
        assert_eq!(
            entry,
            "#begin sounds/sfx/jump.wav\n\
             /importer:WavImporter\n\
             /processor:SoundEffectProcessor\n\
             /processorParam:Quality=Best\n\
             /build:sounds/sfx/jump.wav\n"
        );
    }

    #[test]
    fn test_image_entry_keeps_param_order() {
        let entry = generate_entry("art/hero.png", AssetTypeTable::standard()).unwrap();
        let lines: Vec<_> = entry.lines().collect();

        assert_eq!(lines[0], "#begin art/hero.png");
        assert_eq!(lines[1], "/importer:TextureImporter");
        assert_eq!(lines[2], "/processor:TextureProcessor");
        assert_eq!(lines[3], "/processorParam:ColorKeyColor=255,0,255,255");
        assert_eq!(lines[9], "/processorParam:TextureFormat=Color");
        assert_eq!(lines[10], "/build:art/hero.png");
        assert_eq!(lines.len(), 11);
        assert!(entry.ends_with('\n'));
    }

    #[test]
    fn test_uppercase_extension_is_recognized() {
        let entry = generate_entry("art/SKY.JPEG", AssetTypeTable::standard()).unwrap();
        assert!(entry.starts_with("#begin art/SKY.JPEG\n/importer:TextureImporter\n"));
    }

    #[test]
    fn test_unknown_extension_has_no_entry() {
        let table = AssetTypeTable::standard();
        assert!(generate_entry("music/theme.ogg", table).is_none());
        assert!(generate_entry("LICENSE", table).is_none());
    }
}
