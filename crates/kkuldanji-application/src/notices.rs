//! Fixed user-facing strings.

/// Appended as the assistant reply when a chat call fails.
pub const CHAT_FALLBACK_MESSAGE: &str = "AI 분석 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// Appended to the chat log after a report is installed.
pub const GENERATION_CONFIRMATION: &str = "자료 분석을 기반으로 인터랙티브 인수인계서 초안을 완성했습니다! 리포트 영역에서 내용을 확인하고 직접 수정할 수 있습니다.";

/// Blocking alert shown when report generation fails.
pub const GENERATION_FAILED_ALERT: &str = "인수인계서 생성에 실패했습니다. 파일 내용을 다시 확인해 주세요.";

pub const ROOMS_INPUT_PLACEHOLDER: &str = "채팅방 내역을 선택해주세요.";
pub const CHAT_INPUT_PLACEHOLDER: &str = "자료에 대해 궁금한 점을 물어보세요...";
pub const NO_SAVED_SESSIONS: &str = "아직 저장된 채팅방이 없습니다.";
pub const NO_SOURCES: &str = "아직 저장된 자료가 없어요.";
