use std::fmt;
use web3_rlp::{Decoder, DecoderConfig, DecoderError, Header, RlpError};

/// One header found while walking an encoded buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub offset: usize,
    pub depth: usize,
    pub header: Header,
    /// Payload of a byte string; `None` for lists.
    pub payload: Option<Vec<u8>>,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.header.list { "list" } else { "bytes" };
        write!(
            f,
            "{:06x}  {:indent$}{:<5} header={} payload={}",
            self.offset,
            "",
            kind,
            self.header.header_len,
            self.header.payload_len,
            indent = self.depth * 2
        )?;
        if let Some(payload) = &self.payload {
            write!(f, "  0x{}", hex::encode(payload))?;
        }
        Ok(())
    }
}

/// Walks every back-to-back item in `data`, listing each header in
/// document order.
pub fn inspect(data: &[u8], config: &DecoderConfig) -> Result<Vec<Entry>, RlpError> {
    let mut decoder = Decoder::new(data).with_config(*config);
    let mut entries = Vec::new();
    while !decoder.is_finished() {
        walk(&mut decoder, 0, config.max_depth, &mut entries)?;
    }
    Ok(entries)
}

fn walk(
    decoder: &mut Decoder,
    depth: usize,
    max_depth: usize,
    entries: &mut Vec<Entry>,
) -> Result<(), RlpError> {
    let offset = decoder.position();
    let header = decoder.decode_header()?;

    if !header.list {
        let payload = decoder.read_payload(&header)?.to_vec();
        entries.push(Entry {
            offset,
            depth,
            header,
            payload: Some(payload),
        });
        return Ok(());
    }

    if depth >= max_depth {
        return Err(DecoderError::DepthLimitExceeded(max_depth).into());
    }
    entries.push(Entry {
        offset,
        depth,
        header,
        payload: None,
    });

    let start = decoder.position();
    let end = start + header.payload_len;
    while decoder.position() < end {
        walk(decoder, depth + 1, max_depth, entries)?;
    }
    if decoder.position() != end {
        return Err(DecoderError::ListLengthMismatch {
            expected: header.payload_len,
            actual: decoder.position() - start,
        }
        .into());
    }

    Ok(())
}
