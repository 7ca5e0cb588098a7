use crate::motion::{validate_sequence, Frame};
use crate::prelude::{ChannelError, ChannelResult, TransformConfig};
use crate::processing::transform::{root_reference, transform, transform_frame};
use std::sync::Arc;
use tokio::task::spawn_blocking;

/// Same result as [`transform`], with contiguous chunks of frames rewritten on blocking
/// worker threads. The root reference is captured from frame 0 before any chunk starts
/// and each chunk keeps its absolute frame indices, so the spin angle is unchanged.
pub async fn transform_concurrent(
    frames: Vec<Frame>,
    config: TransformConfig,
    workers: usize,
) -> ChannelResult<Vec<Frame>> {
    if workers == 0 {
        return Err(ChannelError::InvalidConfig(
            "worker count must be at least 1".into(),
        ));
    }
    if workers == 1 || frames.len() <= 1 {
        return transform(&frames, &config);
    }

    config.validate()?;
    validate_sequence(&frames)?;
    let reference = root_reference(&frames, &config);

    let total = frames.len();
    let chunk_len = total.div_ceil(workers);
    let frames = Arc::new(frames);
    let config = Arc::new(config);

    let mut handles = Vec::with_capacity(workers);
    for start in (0..total).step_by(chunk_len) {
        let end = (start + chunk_len).min(total);
        let frames = Arc::clone(&frames);
        let config = Arc::clone(&config);
        handles.push(spawn_blocking(move || {
            frames[start..end]
                .iter()
                .enumerate()
                .map(|(offset, frame)| transform_frame(frame, start + offset, reference, &config))
                .collect::<ChannelResult<Vec<_>>>()
        }));
    }

    let mut output = Vec::with_capacity(total);
    for handle in handles {
        let chunk = handle
            .await
            .map_err(|err| ChannelError::Internal(format!("transform worker failed: {}", err)))??;
        output.extend(chunk);
    }
    Ok(output)
}
