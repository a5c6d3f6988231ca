// Screening: résumé vs job description matching.
// Implements: batch ranking (screen), single-candidate scan, raw-text scoring.
// Handlers only parse input and hand off to the pipeline on a blocking thread.

pub mod handlers;
pub mod pipeline;
