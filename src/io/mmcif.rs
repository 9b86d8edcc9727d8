use super::{BioReader, error::Error, util};
use crate::model::system::System;
use bio_forge as bf;
use std::io::BufRead;

pub fn read<R: BufRead>(builder: BioReader<R>) -> Result<System, Error> {
    let bio_context = bf::io::IoContext::new_default();
    let bio_struct = bf::io::read_mmcif_structure(builder.reader, &bio_context)?;
    util::finish_structure(bio_struct, builder.protonation, &builder.topology_config)
}
