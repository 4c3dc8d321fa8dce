use serde::{Deserialize, Serialize};

/// Level data structure matching JSON format
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub block_size: u32,
    pub spawn_point: SpawnPoint,
    pub blocks: Vec<BlockData>,
}

/// Player spawn position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
}

/// One static block, positioned by its top-left corner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub name: Option<String>,
}

impl LevelData {
    /// The built-in layout: a floor spanning one viewport to the left
    /// and two to the right, a step block at the left edge, and one
    /// floating block.
    pub fn desert_run(viewport_width: i32, viewport_height: i32) -> Self {
        let block_size: u32 = 64;
        let block = block_size as i32;
        let floor_y = viewport_height - block;

        let mut blocks: Vec<BlockData> = (-viewport_width / block..(viewport_width * 2) / block)
            .map(|i| BlockData {
                x: i * block,
                y: floor_y,
                name: Some("floor".to_string()),
            })
            .collect();

        blocks.push(BlockData {
            x: 0,
            y: viewport_height - block * 2,
            name: Some("step".to_string()),
        });
        blocks.push(BlockData {
            x: block * 4,
            y: viewport_height - block * 5,
            name: Some("ledge".to_string()),
        });

        Self {
            name: "desert_run".to_string(),
            block_size,
            spawn_point: SpawnPoint { x: 100, y: 100 },
            blocks,
        }
    }
}
