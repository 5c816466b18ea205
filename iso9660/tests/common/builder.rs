use crate::common::MemoryBlockDevice;

const SECTOR: usize = 2048;
const PVD_LBA: u32 = 16;
const TERMINATOR_LBA: u32 = 17;
const PATH_TABLE_LBA: u32 = 18;
const FIRST_DIR_LBA: u32 = 19;

#[derive(Debug, Clone)]
enum Node {
    File { name: String, content: Vec<u8> },
    Dir { name: String, children: Vec<Node> },
}

#[derive(Debug)]
enum Slot {
    Dir { name: String, index: usize },
    File { name: String, content: Vec<u8>, lba: u32 },
}

#[derive(Debug)]
struct FlatDir {
    parent: usize,
    lba: u32,
    sectors: u32,
    slots: Vec<Slot>,
}

/// Lays out a small but structurally complete ISO9660 image in memory:
/// primary volume descriptor, terminator, path table, one extent per
/// directory (spanning sectors when needed) and the file payloads.
pub struct IsoBuilder {
    root: Vec<Node>,
    volume_id: String,
    version_suffix: bool,
    data_start: u32,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            root: Vec::new(),
            volume_id: "TEST_VOLUME".to_string(),
            version_suffix: true,
            data_start: 0,
        }
    }

    /// Add a file, creating intermediate directories; names are used verbatim
    pub fn add_file(&mut self, path: &str, content: &[u8]) -> &mut Self {
        let parts: Vec<&str> = path.split('/').collect();
        let (file, dirs) = parts.split_last().expect("non-empty path");
        let level = Self::descend(&mut self.root, dirs);
        level.push(Node::File {
            name: file.to_string(),
            content: content.to_vec(),
        });
        self
    }

    /// Add an (empty) directory, creating intermediate directories
    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        let parts: Vec<&str> = path.split('/').collect();
        Self::descend(&mut self.root, &parts);
        self
    }

    /// Write file identifiers without the `;1` suffix
    pub fn without_version_suffix(&mut self) -> &mut Self {
        self.version_suffix = false;
        self
    }

    /// First LBA used for file payloads
    pub fn data_start(&mut self, lba: u32) -> &mut Self {
        self.data_start = lba;
        self
    }

    pub fn volume_id(&mut self, id: &str) -> &mut Self {
        self.volume_id = id.to_string();
        self
    }

    fn descend<'a>(mut level: &'a mut Vec<Node>, dirs: &[&str]) -> &'a mut Vec<Node> {
        for dir in dirs {
            let pos = level
                .iter()
                .position(|n| matches!(n, Node::Dir { name, .. } if name == dir));
            let pos = match pos {
                Some(pos) => pos,
                None => {
                    level.push(Node::Dir {
                        name: dir.to_string(),
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };
            level = match &mut level[pos] {
                Node::Dir { children, .. } => children,
                Node::File { .. } => unreachable!(),
            };
        }
        level
    }

    pub fn build_device(&self) -> MemoryBlockDevice {
        MemoryBlockDevice::new(self.build())
    }

    pub fn build(&self) -> Vec<u8> {
        // 1. Flatten directories, root first
        let mut dirs = vec![FlatDir {
            parent: 0,
            lba: 0,
            sectors: 0,
            slots: Vec::new(),
        }];
        self.flatten(&self.root, 0, &mut dirs);

        // 2. Directory extents
        let mut next_lba = FIRST_DIR_LBA;
        for i in 0..dirs.len() {
            let names: Vec<Vec<u8>> = dirs[i].slots.iter().map(|s| self.identifier(s)).collect();
            let mut lens = vec![record_len(1), record_len(1)];
            lens.extend(names.iter().map(|n| record_len(n.len())));
            let sectors = sectors_needed(&lens);
            dirs[i].lba = next_lba;
            dirs[i].sectors = sectors;
            next_lba += sectors;
        }

        // 3. File payloads
        next_lba = next_lba.max(self.data_start);
        for dir in dirs.iter_mut() {
            for slot in dir.slots.iter_mut() {
                if let Slot::File { content, lba, .. } = slot {
                    *lba = next_lba;
                    next_lba += ((content.len() + SECTOR - 1) / SECTOR).max(1) as u32;
                }
            }
        }

        let total = next_lba.max(FIRST_DIR_LBA + 1);
        let mut data = vec![0u8; total as usize * SECTOR];

        self.write_descriptors(&mut data, &dirs[0], total);
        write_path_table(&mut data, dirs[0].lba);

        for dir in &dirs {
            let parent = &dirs[dir.parent];
            let mut records: Vec<(Vec<u8>, u32, u32, u8)> = vec![
                (vec![0], dir.lba, dir.sectors * SECTOR as u32, 0x02),
                (vec![1], parent.lba, parent.sectors * SECTOR as u32, 0x02),
            ];
            for slot in &dir.slots {
                let id = self.identifier(slot);
                match slot {
                    Slot::Dir { index, .. } => {
                        let child = &dirs[*index];
                        records.push((id, child.lba, child.sectors * SECTOR as u32, 0x02));
                    }
                    Slot::File { content, lba, .. } => {
                        records.push((id, *lba, content.len() as u32, 0x00));
                    }
                }
            }
            write_records(&mut data, dir.lba, &records);

            for slot in &dir.slots {
                if let Slot::File { content, lba, .. } = slot {
                    let off = *lba as usize * SECTOR;
                    data[off..off + content.len()].copy_from_slice(content);
                }
            }
        }

        data
    }

    fn flatten(&self, nodes: &[Node], current: usize, dirs: &mut Vec<FlatDir>) {
        for node in nodes {
            match node {
                Node::File { name, content } => dirs[current].slots.push(Slot::File {
                    name: name.clone(),
                    content: content.clone(),
                    lba: 0,
                }),
                Node::Dir { name, children } => {
                    let index = dirs.len();
                    dirs.push(FlatDir {
                        parent: current,
                        lba: 0,
                        sectors: 0,
                        slots: Vec::new(),
                    });
                    dirs[current].slots.push(Slot::Dir {
                        name: name.clone(),
                        index,
                    });
                    self.flatten(children, index, dirs);
                }
            }
        }
    }

    fn identifier(&self, slot: &Slot) -> Vec<u8> {
        match slot {
            Slot::Dir { name, .. } => name.as_bytes().to_vec(),
            Slot::File { name, .. } if self.version_suffix => format!("{name};1").into_bytes(),
            Slot::File { name, .. } => name.as_bytes().to_vec(),
        }
    }

    fn write_descriptors(&self, data: &mut [u8], root: &FlatDir, total_sectors: u32) {
        let pvd = PVD_LBA as usize * SECTOR;
        data[pvd] = 1;
        data[pvd + 1..pvd + 6].copy_from_slice(b"CD001");
        data[pvd + 6] = 1;

        data[pvd + 8..pvd + 40].fill(b' ');
        data[pvd + 8..pvd + 12].copy_from_slice(b"TEST");
        data[pvd + 40..pvd + 72].fill(b' ');
        let vol = self.volume_id.as_bytes();
        data[pvd + 40..pvd + 40 + vol.len()].copy_from_slice(vol);

        write_both_endian_u32(&mut data[pvd + 80..], total_sectors);
        write_both_endian_u16(&mut data[pvd + 120..], 1);
        write_both_endian_u16(&mut data[pvd + 124..], 1);
        write_both_endian_u16(&mut data[pvd + 128..], SECTOR as u16);
        write_both_endian_u32(&mut data[pvd + 132..], 10);
        data[pvd + 140..pvd + 144].copy_from_slice(&PATH_TABLE_LBA.to_le_bytes());
        data[pvd + 148..pvd + 152].copy_from_slice(&PATH_TABLE_LBA.to_be_bytes());

        let mut root_record = Vec::new();
        encode_record(&mut root_record, &[0], root.lba, root.sectors * SECTOR as u32, 0x02);
        data[pvd + 156..pvd + 156 + root_record.len()].copy_from_slice(&root_record);

        data[pvd + 813..pvd + 829].copy_from_slice(b"2014012200000000");
        data[pvd + 881] = 1;

        let term = TERMINATOR_LBA as usize * SECTOR;
        data[term] = 255;
        data[term + 1..term + 6].copy_from_slice(b"CD001");
        data[term + 6] = 1;
    }
}

fn write_path_table(data: &mut [u8], root_lba: u32) {
    let off = PATH_TABLE_LBA as usize * SECTOR;
    data[off] = 1; // identifier length
    data[off + 2..off + 6].copy_from_slice(&root_lba.to_le_bytes());
    data[off + 6..off + 8].copy_from_slice(&1u16.to_le_bytes());
    data[off + 8] = 0; // root identifier
}

pub fn record_len(name_len: usize) -> usize {
    let len = 33 + name_len;
    len + len % 2
}

fn sectors_needed(lens: &[usize]) -> u32 {
    let mut sectors = 1;
    let mut used = 0;
    for &len in lens {
        if used + len > SECTOR {
            sectors += 1;
            used = 0;
        }
        used += len;
    }
    sectors
}

fn write_records(data: &mut [u8], lba: u32, records: &[(Vec<u8>, u32, u32, u8)]) {
    let mut sector = lba as usize;
    let mut used = 0;
    for (name, extent, size, flags) in records {
        let mut encoded = Vec::new();
        encode_record(&mut encoded, name, *extent, *size, *flags);
        if used + encoded.len() > SECTOR {
            sector += 1;
            used = 0;
        }
        let off = sector * SECTOR + used;
        data[off..off + encoded.len()].copy_from_slice(&encoded);
        used += encoded.len();
    }
}

pub fn encode_record(out: &mut Vec<u8>, name: &[u8], lba: u32, size: u32, flags: u8) {
    let len = record_len(name.len());
    let start = out.len();
    out.resize(start + len, 0);
    let rec = &mut out[start..];
    rec[0] = len as u8;
    write_both_endian_u32(&mut rec[2..], lba);
    write_both_endian_u32(&mut rec[10..], size);
    rec[25] = flags;
    write_both_endian_u16(&mut rec[28..], 1);
    rec[32] = name.len() as u8;
    rec[33..33 + name.len()].copy_from_slice(name);
}

fn write_both_endian_u32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}

fn write_both_endian_u16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}
