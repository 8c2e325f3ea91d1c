//! Trace record and sink tests.

use pretty_assertions::assert_eq;
use rrsim_core::process::Opcode;
use rrsim_core::sim::trace::{MemorySink, TraceRecord, TraceSink, WriterSink};
use tempfile::TempDir;

fn record(next: Option<Opcode>) -> TraceRecord {
    TraceRecord {
        instructions: 12,
        opcode: Opcode::IoWait,
        process: "Proceso_3".into(),
        program_counter: 4,
        next,
    }
}

#[test]
fn test_record_with_next_opcode() {
    assert_eq!(
        record(Some(Opcode::FinishAttempt)).to_string(),
        "12 ES Proceso_3 4 F"
    );
}

#[test]
fn test_record_with_exhausted_tape() {
    assert_eq!(record(None).to_string(), "12 ES Proceso_3 4");
}

#[test]
fn test_writer_sink_writes_lines() {
    let mut sink = WriterSink::new(Vec::new());
    sink.record(&record(Some(Opcode::Compute))).unwrap();
    sink.record(&record(None)).unwrap();
    sink.finish(0).unwrap();

    assert_eq!(sink.lines(), 2);
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text, "12 ES Proceso_3 4 I\n12 ES Proceso_3 4\n");
}

#[test]
fn test_writer_sink_creates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("salida.txt");

    let mut sink = WriterSink::create(&path).unwrap();
    sink.record(&record(None)).unwrap();
    sink.finish(1).unwrap();
    drop(sink);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "12 ES Proceso_3 4\n");
}

#[test]
fn test_writer_sink_unwritable_path() {
    let dir = TempDir::new().unwrap();
    let err = WriterSink::create(&dir.path().join("missing").join("out.txt")).unwrap_err();
    assert!(matches!(err, rrsim_core::SimError::Sink(_)));
}

#[test]
fn test_memory_sink_keeps_records_and_count() {
    let mut sink = MemorySink::new();
    sink.record(&record(None)).unwrap();
    sink.finish(3).unwrap();
    assert_eq!(sink.records, vec![record(None)]);
    assert_eq!(sink.preemptions, Some(3));
    assert_eq!(sink.lines(), vec!["12 ES Proceso_3 4"]);
}
