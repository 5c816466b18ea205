//! Directory record parsing and tree construction

pub mod builder;
pub mod flags;
pub mod path_table;
pub mod record;

use crate::error::Result;
use crate::tree::Tree;
use crate::volume::PrimaryVolumeDescriptor;
use builder::TreeBuilder;
use gpt_disk_io::BlockIo;

/// Build the complete directory tree of a volume
///
/// The root directory is located through the first path table record, then
/// every directory below it is decoded eagerly.
///
/// # Example
/// ```ignore
/// let descriptor = volume::load_primary_descriptor(&mut block_io)?;
/// let tree = directory::build_tree(&mut block_io, &descriptor)?;
/// println!("{tree}");
/// ```
pub fn build_tree<B: BlockIo>(
    block_io: &mut B,
    descriptor: &PrimaryVolumeDescriptor,
) -> Result<Tree> {
    let root = path_table::root_location(block_io, descriptor)?;
    let entries = TreeBuilder::new(block_io).build_directory(root)?;
    Ok(Tree::new(entries))
}
