pub const APP_CSS: &str = r#"
:root {
    --color-accent: #7c3aed;
    --color-accent-end: #3b82f6;
    --color-bg-primary: #f9fafb;
    --color-surface: #ffffff;
    --color-text-primary: #1f2937;
    --color-text-muted: #6b7280;
    --color-border: #e5e7eb;
    --color-chat-user-bg: #7c3aed;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #ffffff;
    --color-chat-assistant-text: #1f2937;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.app-shell { min-height: 100vh; display: flex; flex-direction: column; }
.main-container { max-width: 48rem; width: 100%; margin: 0 auto; padding: 1.5rem; flex: 1; display: flex; flex-direction: column; }
.centered { text-align: center; }
.text-muted { color: var(--color-text-muted); }
.small { font-size: 0.85rem; }
.panel { background: var(--color-surface); border-radius: 0.75rem; padding: 2rem; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.15); }
.panel-title { text-align: center; font-size: 1.8rem; margin: 0 0 1.5rem; }
.section-title { font-size: 1.3rem; margin: 1.5rem 0 1rem; }
.model-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.model-card { border: 1px solid var(--color-border); border-radius: 0.5rem; padding: 1.25rem; cursor: pointer; }
.model-card.selected { outline: 2px solid var(--color-accent); background: #f5f3ff; }
.model-name { margin: 0 0 0.5rem; }
.card-actions { display: flex; justify-content: space-between; align-items: center; }
.link { color: var(--color-accent-end); background: none; border: none; cursor: pointer; }
.start-row { display: flex; justify-content: center; margin-top: 2rem; }
.btn { border: none; border-radius: 0.5rem; padding: 0.6rem 1rem; cursor: pointer; font-weight: 500; }
.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: linear-gradient(90deg, var(--color-accent), var(--color-accent-end)); color: #ffffff; }
.btn-large { padding: 0.8rem 2rem; font-size: 1.1rem; }
.btn-ghost { background: rgba(255, 255, 255, 0.2); color: #ffffff; }
.chat-header { background: linear-gradient(90deg, var(--color-accent), var(--color-accent-end)); color: #ffffff; padding: 1rem; }
.chat-header-inner { max-width: 48rem; margin: 0 auto; display: flex; justify-content: space-between; align-items: center; }
.header-actions { display: flex; gap: 0.5rem; }
.chat-title { font-size: 1.25rem; margin: 0; }
.chat-subtitle { font-size: 0.9rem; margin: 0.2rem 0; opacity: 0.8; }
.chat-meta { font-size: 0.75rem; margin: 0; opacity: 0.6; }
.chat-wrap { flex: 1; overflow-y: auto; }
.chat-list { display: flex; flex-direction: column; gap: 1rem; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.message-row.assistant { justify-content: flex-start; }
.bubble { max-width: 28rem; padding: 1rem; border-radius: 0.75rem; white-space: pre-wrap; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); border-bottom-right-radius: 0; }
.bubble.assistant { background: var(--color-chat-assistant-bg); color: var(--color-chat-assistant-text); border: 1px solid var(--color-border); border-bottom-left-radius: 0; white-space: normal; }
.bubble-controls { display: flex; justify-content: flex-end; margin-top: 0.5rem; }
.action-btn { background: none; border: 1px solid var(--color-border); border-radius: 0.25rem; font-size: 0.75rem; cursor: pointer; }
.composer { border-top: 1px solid var(--color-border); padding-top: 1rem; margin-top: 1rem; }
.composer-inner { display: flex; gap: 0.5rem; }
.composer-inner input { flex: 1; padding: 0.75rem; border: 1px solid var(--color-border); border-radius: 0.5rem; }
.loading { text-align: center; padding: 2.5rem 0; }
.dots { display: flex; justify-content: center; gap: 0.5rem; }
.dots span { width: 0.6rem; height: 0.6rem; border-radius: 50%; background: var(--color-accent); animation: bounce 1s infinite; }
.dots span:nth-child(2) { animation-delay: 0.2s; }
.dots span:nth-child(3) { animation-delay: 0.4s; }
@keyframes bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-0.4rem); } }
"#;
