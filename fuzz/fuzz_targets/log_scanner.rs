#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use dockgrep_log_scanner::LogScanner;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 로그 스냅샷 (폴링마다 늘어나거나 잘릴 수 있음)
    log: Vec<String>,
    /// 스냅샷별 연산 순서
    steps: Vec<FuzzStep>,
}

#[derive(Arbitrary, Debug)]
struct FuzzStep {
    /// 스냅샷으로 쓸 로그 길이
    visible: u8,
    pattern: FuzzPattern,
    op: FuzzOp,
}

#[derive(Arbitrary, Debug)]
enum FuzzPattern {
    /// 임의 문자열 (대부분 유효한 정규식이 아님)
    Raw(String),
    /// 항상 유효한 리터럴
    Literal(String),
}

#[derive(Arbitrary, Debug)]
enum FuzzOp {
    Scan,
    HasMatch,
    Reset,
}

fuzz_target!(|input: FuzzInput| {
    // 라인 수 제한 (OOM 방지)
    let log: Vec<String> = input.log.into_iter().take(256).collect();
    let mut scanner = LogScanner::new();

    for step in input.steps.into_iter().take(32) {
        let visible = usize::from(step.visible).min(log.len());
        let snapshot = &log[..visible];
        let pattern = match step.pattern {
            FuzzPattern::Raw(p) => p,
            FuzzPattern::Literal(p) => regex::escape(&p),
        };
        let before = scanner.cursor();

        match step.op {
            FuzzOp::Scan => match scanner.scan_matches(snapshot, &pattern) {
                Ok(records) => {
                    // 결과는 윈도우 안에서 엄격히 증가
                    for pair in records.windows(2) {
                        assert!(pair[0].line_number < pair[1].line_number);
                    }
                    if let Some(first) = records.first() {
                        assert!(before.is_none_or(|c| first.line_number > c));
                    }
                    match records.last() {
                        Some(last) => assert_eq!(scanner.cursor(), Some(last.line_number)),
                        None => assert_eq!(scanner.cursor(), before),
                    }
                }
                Err(_) => assert_eq!(scanner.cursor(), before),
            },
            FuzzOp::HasMatch => match scanner.has_match(snapshot, &pattern) {
                Ok(true) => {
                    let after = scanner.cursor();
                    assert!(after.is_some());
                    assert!(before.is_none_or(|c| after > Some(c)));
                }
                Ok(false) | Err(_) => assert_eq!(scanner.cursor(), before),
            },
            FuzzOp::Reset => {
                scanner.reset();
                assert_eq!(scanner.cursor(), None);
            }
        }
    }
});
